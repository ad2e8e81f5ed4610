//! Logic lõi của widget đếm ngược: bản ghi bộ đếm, store, định dạng hiển thị.

mod config;
mod error;
mod format;
mod storage;
mod store;
mod theme;
mod timer;
mod validation;
mod view;

pub use config::{CooldownConfig, DEFAULT_THEME_KEY, DEFAULT_TIMERS_KEY};
pub use error::{StoreError, StoreResult};
pub use format::{format_remaining, progress_percent, READY_LABEL};
pub use storage::{Clock, KeyValueStore, ManualClock, MemoryStorage, StorageError, SystemClock};
pub use store::{TickOutcome, TimerStore};
pub use theme::Theme;
pub use timer::{TimerId, TimerRecord};
pub use validation::{TimerDraft, ValidDraft, ValidationError};
pub use view::{render_views, TimerAction, TimerView};
