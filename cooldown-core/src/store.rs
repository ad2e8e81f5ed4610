//! Store sở hữu danh sách bộ đếm, đồng bộ với kho key-value sau mỗi thay đổi.

use tracing::{debug, info, warn};

use crate::config::CooldownConfig;
use crate::error::{StoreError, StoreResult};
use crate::storage::{Clock, KeyValueStore};
use crate::theme::Theme;
use crate::timer::{TimerId, TimerRecord};
use crate::validation::TimerDraft;
use crate::view::{render_views, TimerView};

/// Kết quả một lần tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Các bộ đếm vừa về trạng thái sẵn sàng, theo thứ tự trong danh sách.
    pub expired: Vec<TimerId>,
}

impl TickOutcome {
    pub fn changed(&self) -> bool {
        !self.expired.is_empty()
    }
}

/// Trạng thái toàn trang: danh sách bộ đếm, chế độ màu, kho lưu trữ và đồng hồ.
///
/// Dựng một lần khi khởi động bằng [`TimerStore::load`] và sống suốt vòng đời trang.
/// Chỉ có một nguồn tick duy nhất, do bên gọi điều khiển qua [`TimerStore::tick`].
#[derive(Debug)]
pub struct TimerStore<S, C> {
    storage: S,
    clock: C,
    config: CooldownConfig,
    timers: Vec<TimerRecord>,
    saved_theme: Option<Theme>,
    preferred_theme: Theme,
}

impl<S: KeyValueStore, C: Clock> TimerStore<S, C> {
    /// Đọc danh sách đã lưu. Dữ liệu thiếu hoặc hỏng cho ra danh sách rỗng.
    pub fn load(storage: S, clock: C, config: CooldownConfig) -> Self {
        let timers = read_timers(&storage, &config.timers_key);
        let saved_theme = match storage.get(&config.theme_key) {
            Ok(value) => value.as_deref().and_then(Theme::parse),
            Err(err) => {
                warn!(error = %err, "không đọc được theme đã lưu");
                None
            }
        };

        let mut store = Self {
            storage,
            clock,
            config,
            timers,
            saved_theme,
            preferred_theme: Theme::Light,
        };

        let now = store.clock.now_ms();
        let mut expired_while_away = 0;
        for timer in &mut store.timers {
            if timer.expire_if_due(now) {
                expired_while_away += 1;
            }
        }
        info!(
            timers = store.timers.len(),
            expired_while_away, "đã nạp danh sách bộ đếm"
        );

        if let Err(err) = store.persist() {
            warn!(error = %err, "không ghi lại được danh sách sau khi nạp");
        }
        store
    }

    pub fn config(&self) -> &CooldownConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn timers(&self) -> &[TimerRecord] {
        &self.timers
    }

    pub fn get(&self, id: TimerId) -> Option<&TimerRecord> {
        self.timers.iter().find(|timer| timer.id == id)
    }

    pub fn has_running(&self) -> bool {
        self.timers.iter().any(|timer| timer.is_running)
    }

    /// Thêm bộ đếm mới ở trạng thái dừng. Dữ liệu không hợp lệ không làm thay đổi store.
    pub fn create(&mut self, draft: &TimerDraft) -> StoreResult<TimerId> {
        let valid = draft.validate()?;
        let id = self.next_id();
        self.timers
            .push(TimerRecord::new(id, valid.name(), valid.duration()));
        self.persist()?;
        debug!(%id, name = valid.name(), duration = valid.duration(), "đã tạo bộ đếm");
        Ok(id)
    }

    /// Nút Start/Pause: bắt đầu nếu đang dừng, ngược lại tạm dừng.
    /// Trả về trạng thái chạy mới.
    pub fn toggle(&mut self, id: TimerId) -> StoreResult<bool> {
        let now = self.clock.now_ms();
        let timer = self.find_mut(id)?;
        if timer.is_running {
            timer.pause();
        } else {
            timer.start(now);
        }
        let running = timer.is_running;
        self.persist()?;
        debug!(%id, running, "đổi trạng thái bộ đếm");
        Ok(running)
    }

    pub fn pause(&mut self, id: TimerId) -> StoreResult<()> {
        self.find_mut(id)?.pause();
        self.persist()?;
        debug!(%id, "tạm dừng bộ đếm");
        Ok(())
    }

    /// Đếm lại từ đầu, bất kể trạng thái hiện tại.
    pub fn reset(&mut self, id: TimerId) -> StoreResult<()> {
        let now = self.clock.now_ms();
        self.find_mut(id)?.start(now);
        self.persist()?;
        debug!(%id, "đặt lại bộ đếm");
        Ok(())
    }

    /// Kiểm tra hạn của mọi bộ đếm đang chạy; chỉ ghi xuống kho khi có thay đổi.
    pub fn tick(&mut self) -> StoreResult<TickOutcome> {
        let now = self.clock.now_ms();
        let expired: Vec<TimerId> = self
            .timers
            .iter_mut()
            .filter_map(|timer| timer.expire_if_due(now).then_some(timer.id))
            .collect();

        let outcome = TickOutcome { expired };
        if outcome.changed() {
            self.persist()?;
            info!(expired = ?outcome.expired, "bộ đếm đã sẵn sàng");
        }
        Ok(outcome)
    }

    /// Dựng lại toàn bộ danh sách hiển thị tại thời điểm hiện tại.
    pub fn render(&self) -> Vec<TimerView> {
        self.render_at(self.clock.now_ms())
    }

    pub fn render_at(&self, now_ms: i64) -> Vec<TimerView> {
        render_views(&self.timers, now_ms)
    }

    pub fn theme(&self) -> Theme {
        self.saved_theme.unwrap_or(self.preferred_theme)
    }

    /// Ghi nhận tuỳ chọn màu của hệ điều hành; chỉ dùng khi chưa có theme đã lưu.
    pub fn set_preferred_theme(&mut self, prefers_dark: bool) {
        self.preferred_theme = Theme::resolve(None, prefers_dark);
    }

    pub fn toggle_theme(&mut self) -> StoreResult<Theme> {
        let next = self.theme().toggled();
        self.storage.set(&self.config.theme_key, next.as_str())?;
        self.saved_theme = Some(next);
        debug!(theme = next.as_str(), "đổi theme");
        Ok(next)
    }

    fn find_mut(&mut self, id: TimerId) -> StoreResult<&mut TimerRecord> {
        self.timers
            .iter_mut()
            .find(|timer| timer.id == id)
            .ok_or(StoreError::UnknownTimer(id))
    }

    fn next_id(&self) -> TimerId {
        let candidate = self.clock.now_ms();
        if self.get(TimerId(candidate)).is_none() {
            return TimerId(candidate);
        }
        let max = self.timers.iter().map(|timer| timer.id.0).max();
        match max.and_then(|max| max.checked_add(1)) {
            Some(next) => TimerId(next),
            // Đã chạm i64::MAX: lùi xuống tìm id còn trống.
            None => (i64::MIN..candidate)
                .rev()
                .map(TimerId)
                .find(|id| self.get(*id).is_none())
                .unwrap_or(TimerId(i64::MIN)),
        }
    }

    fn persist(&mut self) -> StoreResult<()> {
        let encoded = serde_json::to_string(&self.timers)?;
        self.storage.set(&self.config.timers_key, &encoded)?;
        Ok(())
    }
}

fn read_timers<S: KeyValueStore>(storage: &S, key: &str) -> Vec<TimerRecord> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(error = %err, "kho lưu trữ không khả dụng, bắt đầu với danh sách rỗng");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Option<Vec<TimerRecord>>>(&raw) {
        Ok(timers) => timers
            .unwrap_or_default()
            .into_iter()
            .filter(|timer| {
                let valid = timer.duration > 0;
                if !valid {
                    warn!(id = %timer.id, "bỏ qua bộ đếm có thời lượng không hợp lệ");
                }
                valid
            })
            .collect(),
        Err(err) => {
            warn!(error = %err, "dữ liệu bộ đếm hỏng, bắt đầu với danh sách rỗng");
            Vec::new()
        }
    }
}
