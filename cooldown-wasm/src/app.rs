use cooldown_core::{CooldownConfig, SystemClock, TimerDraft, TimerId, TimerStore};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

use crate::browser::{prefers_dark_scheme, LocalStorage};
use crate::{format_store_error, parse_config};

/// Store bộ đếm cho JavaScript thuần. Bên gọi tự dựng vòng tick theo `tickIntervalMs`.
#[wasm_bindgen]
pub struct CooldownApp {
    store: TimerStore<LocalStorage, SystemClock>,
}

#[wasm_bindgen]
impl CooldownApp {
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsValue>) -> Result<CooldownApp, JsValue> {
        console_error_panic_hook::set_once();

        let cfg = parse_config(config)?;
        let storage = LocalStorage::from_window()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let mut store = TimerStore::load(storage, SystemClock, CooldownConfig::from(&cfg));
        store.set_preferred_theme(prefers_dark_scheme());
        Ok(Self { store })
    }

    /// Tạo bộ đếm từ hai ô nhập; trả về id mới.
    pub fn create(&mut self, name: &str, duration: &str) -> Result<f64, JsValue> {
        let draft = TimerDraft::parse(name, duration)
            .map_err(|err| JsValue::from_str(&format_store_error(err.into())))?;
        let id = self.store.create(&draft).map_err(to_js)?;
        Ok(id.0 as f64)
    }

    pub fn toggle(&mut self, id: f64) -> Result<bool, JsValue> {
        self.store.toggle(timer_id(id)).map_err(to_js)
    }

    pub fn pause(&mut self, id: f64) -> Result<(), JsValue> {
        self.store.pause(timer_id(id)).map_err(to_js)
    }

    pub fn reset(&mut self, id: f64) -> Result<(), JsValue> {
        self.store.reset(timer_id(id)).map_err(to_js)
    }

    /// Trả về `true` khi có bộ đếm vừa hết hạn.
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        self.store.tick().map(|outcome| outcome.changed()).map_err(to_js)
    }

    pub fn render(&self) -> Result<JsValue, JsValue> {
        to_value(&self.store.render())
            .map_err(|err| JsValue::from_str(&format!("Không serialize danh sách: {err}")))
    }

    pub fn theme(&self) -> String {
        self.store.theme().as_str().to_string()
    }

    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&mut self) -> Result<String, JsValue> {
        self.store
            .toggle_theme()
            .map(|theme| theme.as_str().to_string())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = tickIntervalMs)]
    pub fn tick_interval_ms(&self) -> u32 {
        self.store.config().tick_interval_ms
    }
}

fn timer_id(id: f64) -> TimerId {
    TimerId(id as i64)
}

fn to_js(err: cooldown_core::StoreError) -> JsValue {
    JsValue::from_str(&format_store_error(err))
}
