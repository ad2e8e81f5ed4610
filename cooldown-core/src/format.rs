//! Định dạng thời gian còn lại và tiến độ hiển thị.

/// Nhãn hiển thị khi bộ đếm đã về 0 hoặc không chạy.
pub const READY_LABEL: &str = "Ready";

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;

/// Chuyển số giây còn lại thành nhãn ngắn gọn.
///
/// - trên 1 ngày: `"N day"` / `"N days"`
/// - trên 1 giờ: `HH:MM`
/// - còn lại: `MM:SS`
/// - `<= 0`: [`READY_LABEL`]
pub fn format_remaining(seconds: i64) -> String {
    if seconds <= 0 {
        return READY_LABEL.to_string();
    }
    if seconds > SECS_PER_DAY {
        let days = seconds / SECS_PER_DAY;
        let suffix = if days > 1 { "s" } else { "" };
        return format!("{days} day{suffix}");
    }
    if seconds > SECS_PER_HOUR {
        let hours = seconds / SECS_PER_HOUR;
        let minutes = (seconds % SECS_PER_HOUR) / 60;
        return format!("{hours:02}:{minutes:02}");
    }
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Phần trăm đã trôi qua, giới hạn trong `[0, 100]`.
pub fn progress_percent(duration: i64, remaining: i64) -> f64 {
    if duration <= 0 {
        return 100.0;
    }
    let elapsed = (duration as f64 - remaining as f64) / duration as f64 * 100.0;
    elapsed.clamp(0.0, 100.0)
}
