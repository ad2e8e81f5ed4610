use crate::storage::StorageError;
use crate::timer::TimerId;
use crate::validation::ValidationError;

/// Lỗi chung của [`crate::TimerStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Dữ liệu nhập không hợp lệ: {0}")]
    Validation(#[from] ValidationError),
    #[error("Không tìm thấy bộ đếm {0}")]
    UnknownTimer(TimerId),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Không serialize được danh sách bộ đếm: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
