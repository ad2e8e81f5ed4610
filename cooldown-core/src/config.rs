use serde::{Deserialize, Serialize};

/// Khoá lưu danh sách bộ đếm trong kho key-value.
pub const DEFAULT_TIMERS_KEY: &str = "cooldownTimers";
/// Khoá lưu chế độ màu.
pub const DEFAULT_THEME_KEY: &str = "theme";

/// Cấu hình store và vòng tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CooldownConfig {
    pub timers_key: String,
    pub theme_key: String,
    /// Chu kỳ tick toàn cục (ms).
    pub tick_interval_ms: u32,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            timers_key: DEFAULT_TIMERS_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            tick_interval_ms: 1000,
        }
    }
}
