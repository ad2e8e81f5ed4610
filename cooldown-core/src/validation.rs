//! Kiểm tra dữ liệu nhập khi tạo bộ đếm mới.

use serde::{Deserialize, Serialize};

/// Dữ liệu thô người dùng gửi lên để tạo bộ đếm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerDraft {
    pub name: String,
    /// Thời lượng (giây).
    pub duration: i64,
}

/// Bản nháp đã qua kiểm tra, sẵn sàng đưa vào store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    name: String,
    duration: i64,
}

impl ValidDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Tên bộ đếm không được để trống")]
    EmptyName,
    #[error("Thời lượng phải là số nguyên (giây)")]
    NonNumericDuration,
    #[error("Thời lượng phải lớn hơn 0")]
    NonPositiveDuration,
}

impl TimerDraft {
    pub fn new(name: impl Into<String>, duration: i64) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }

    /// Dựng bản nháp từ hai ô nhập dạng chuỗi.
    pub fn parse(name_input: &str, duration_input: &str) -> Result<Self, ValidationError> {
        let duration = duration_input
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::NonNumericDuration)?;
        Ok(Self::new(name_input.trim(), duration))
    }

    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.duration <= 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        Ok(ValidDraft {
            name: name.to_string(),
            duration: self.duration,
        })
    }
}
