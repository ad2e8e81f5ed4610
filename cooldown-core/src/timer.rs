//! Bản ghi bộ đếm ngược và các chuyển trạng thái của nó.

use serde::{Deserialize, Serialize};

/// Định danh bộ đếm (mốc tạo tính bằng mili giây).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TimerId(pub i64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Một bộ đếm ngược được lưu trữ.
///
/// Tên trường khi serialize khớp với định dạng đã lưu trong `localStorage`
/// (`id, name, duration, isRunning, endTime`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerRecord {
    pub id: TimerId,
    pub name: String,
    /// Thời lượng (giây), luôn > 0.
    pub duration: i64,
    pub is_running: bool,
    /// Mốc hết hạn (ms kể từ epoch). Chỉ có nghĩa khi `is_running`.
    pub end_time: i64,
}

impl TimerRecord {
    pub fn new(id: TimerId, name: impl Into<String>, duration: i64) -> Self {
        Self {
            id,
            name: name.into(),
            duration,
            is_running: false,
            end_time: 0,
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration.saturating_mul(1000)
    }

    /// Số mili giây còn lại, `None` nếu bộ đếm không chạy.
    pub fn remaining_ms(&self, now_ms: i64) -> Option<i64> {
        self.is_running
            .then(|| self.end_time.saturating_sub(now_ms))
    }

    /// Số giây còn lại, làm tròn nửa lên như hiển thị trên trang.
    pub fn remaining_secs(&self, now_ms: i64) -> Option<i64> {
        self.remaining_ms(now_ms)
            .map(|ms| ms.saturating_add(500).div_euclid(1000))
    }

    /// Bắt đầu đếm lại toàn bộ thời lượng.
    pub fn start(&mut self, now_ms: i64) {
        self.is_running = true;
        self.end_time = now_ms.saturating_add(self.duration_ms());
    }

    /// Dừng; tiến độ đã trôi qua không được giữ lại.
    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Chuyển sang trạng thái sẵn sàng nếu đã tới hạn. Trả về `true` khi có thay đổi.
    pub fn expire_if_due(&mut self, now_ms: i64) -> bool {
        match self.remaining_ms(now_ms) {
            Some(remaining) if remaining <= 0 => {
                self.is_running = false;
                true
            }
            _ => false,
        }
    }
}
