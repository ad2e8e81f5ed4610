//! Tiện ích phía trang: `localStorage`, tuỳ chọn màu hệ thống, đăng ký service worker.

use cooldown_core::{KeyValueStore, StorageError};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{console, Storage, Window};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Kho key-value dựa trên `window.localStorage`.
pub struct LocalStorage {
    inner: Storage,
}

impl LocalStorage {
    pub fn from_window() -> Result<Self, StorageError> {
        let window = window().map_err(StorageError::Unavailable)?;
        let inner = window
            .local_storage()
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage bị tắt".to_string()))?;
        Ok(Self { inner })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }
}

fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "Không có window".to_string())
}

/// Hệ điều hành có đang ưu tiên giao diện tối không.
pub fn prefers_dark_scheme() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(DARK_SCHEME_QUERY).ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Đăng ký service worker; lỗi chỉ được ghi ra console, trang vẫn dùng được khi không có offline.
#[wasm_bindgen(js_name = registerServiceWorker)]
pub fn register_service_worker(script_url: &str) {
    let Ok(window) = window() else {
        return;
    };
    let container = window.navigator().service_worker();
    let promise = container.register(script_url);
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(registration) => console::log_2(&"SW registered: ".into(), &registration),
            Err(err) => console::warn_2(&"SW registration failed: ".into(), &err),
        }
    });
}
