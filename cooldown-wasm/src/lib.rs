//! Bridge WASM <-> JavaScript trung lập framework: store bộ đếm trên `localStorage`
//! và các điểm vào cho service worker.

use cooldown_core::{CooldownConfig, StoreError};
use cooldown_offline::{AssetManifest, OfflineError};
use serde::Deserialize;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(target_arch = "wasm32")]
mod worker;

#[cfg(target_arch = "wasm32")]
pub use app::CooldownApp;
#[cfg(target_arch = "wasm32")]
pub use worker::{handle_fetch, install_assets};

/// Cấu hình nhận từ JavaScript; trường nào thiếu thì lấy giá trị mặc định.
#[derive(Debug, Default, Deserialize)]
pub struct JsCooldownConfig {
    #[serde(default)]
    timers_key: Option<String>,
    #[serde(default)]
    theme_key: Option<String>,
    #[serde(default)]
    tick_interval_ms: Option<u32>,
    #[serde(default)]
    cache_name: Option<String>,
    #[serde(default)]
    asset_urls: Option<Vec<String>>,
}

impl From<&JsCooldownConfig> for CooldownConfig {
    fn from(cfg: &JsCooldownConfig) -> Self {
        let mut base = CooldownConfig::default();
        if let Some(key) = &cfg.timers_key {
            base.timers_key = key.clone();
        }
        if let Some(key) = &cfg.theme_key {
            base.theme_key = key.clone();
        }
        if let Some(ms) = cfg.tick_interval_ms.filter(|ms| *ms > 0) {
            base.tick_interval_ms = ms;
        }
        base
    }
}

impl From<&JsCooldownConfig> for AssetManifest {
    fn from(cfg: &JsCooldownConfig) -> Self {
        let mut base = AssetManifest::default();
        if let Some(name) = &cfg.cache_name {
            base.cache_name = name.clone();
        }
        if let Some(urls) = &cfg.asset_urls {
            base.urls = urls.clone();
        }
        base
    }
}

/// Đọc cấu hình tuỳ chọn do JavaScript truyền vào.
pub fn parse_config(config: Option<JsValue>) -> Result<JsCooldownConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => from_value(js_cfg)
            .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}"))),
        _ => Ok(JsCooldownConfig::default()),
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn format_store_error(err: StoreError) -> String {
    format!("Cooldown error: {err}")
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn format_offline_error(err: OfflineError) -> String {
    format!("Offline cache error: {err}")
}
