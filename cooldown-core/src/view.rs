//! Mô hình hiển thị dùng chung cho giao diện web và CLI.

use serde::{Deserialize, Serialize};

use crate::format::{format_remaining, progress_percent, READY_LABEL};
use crate::timer::{TimerId, TimerRecord};

/// Trạng thái hiển thị của một bộ đếm tại một thời điểm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    pub id: TimerId,
    pub name: String,
    pub label: String,
    /// Phần trăm thanh tiến độ, `[0, 100]`.
    pub progress: f64,
    pub is_ready: bool,
    pub action: TimerAction,
    pub show_reset: bool,
}

/// Nhãn của nút bật/tắt trên mỗi bộ đếm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerAction {
    Start,
    Pause,
}

impl TimerAction {
    pub fn label(self) -> &'static str {
        match self {
            TimerAction::Start => "Start",
            TimerAction::Pause => "Pause",
        }
    }
}

impl TimerView {
    pub fn from_record(timer: &TimerRecord, now_ms: i64) -> Self {
        match timer.remaining_secs(now_ms) {
            Some(remaining) => Self {
                id: timer.id,
                name: timer.name.clone(),
                label: format_remaining(remaining),
                progress: progress_percent(timer.duration, remaining),
                is_ready: false,
                action: TimerAction::Pause,
                show_reset: true,
            },
            None => Self {
                id: timer.id,
                name: timer.name.clone(),
                label: READY_LABEL.to_string(),
                progress: 0.0,
                is_ready: true,
                action: TimerAction::Start,
                show_reset: false,
            },
        }
    }
}

/// Dựng lại toàn bộ danh sách hiển thị theo thứ tự chèn.
pub fn render_views(timers: &[TimerRecord], now_ms: i64) -> Vec<TimerView> {
    timers
        .iter()
        .map(|timer| TimerView::from_record(timer, now_ms))
        .collect()
}
