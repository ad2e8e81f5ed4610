//! Điểm vào cho service worker, dựa trên Cache API của trình duyệt.

use cooldown_offline::{
    AssetCache, AssetManifest, CacheStorage, Network, OfflineError, OfflineWorker,
};
use js_sys::{Array, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{console, Request, Response, ServiceWorkerGlobalScope};

use crate::{format_offline_error, parse_config};

fn scope() -> Result<ServiceWorkerGlobalScope, OfflineError> {
    js_sys::global()
        .dyn_into::<ServiceWorkerGlobalScope>()
        .map_err(|_| OfflineError::Network("Không chạy trong service worker".to_string()))
}

struct BrowserCaches {
    inner: web_sys::CacheStorage,
}

impl BrowserCaches {
    fn from_scope(scope: &ServiceWorkerGlobalScope) -> Result<Self, OfflineError> {
        let inner = scope.caches().map_err(|err| OfflineError::Open {
            name: "caches".to_string(),
            reason: format!("{err:?}"),
        })?;
        Ok(Self { inner })
    }
}

impl CacheStorage for BrowserCaches {
    type Cache = BrowserCache;

    async fn open(&self, name: &str) -> Result<BrowserCache, OfflineError> {
        let opened = JsFuture::from(self.inner.open(name))
            .await
            .map_err(|err| OfflineError::Open {
                name: name.to_string(),
                reason: format!("{err:?}"),
            })?;
        Ok(BrowserCache {
            inner: opened.unchecked_into::<web_sys::Cache>(),
        })
    }
}

struct BrowserCache {
    inner: web_sys::Cache,
}

impl AssetCache for BrowserCache {
    type Request = Request;
    type Response = Response;

    async fn add_all(&self, urls: &[String]) -> Result<(), OfflineError> {
        let list: Array = urls.iter().map(|url| JsValue::from_str(url)).collect();
        JsFuture::from(self.inner.add_all_with_str_sequence(&list))
            .await
            .map(|_| ())
            .map_err(|err| OfflineError::Populate {
                url: urls.join(", "),
                reason: format!("{err:?}"),
            })
    }

    async fn lookup(&self, request: &Request) -> Result<Option<Response>, OfflineError> {
        let found = JsFuture::from(self.inner.match_with_request(request))
            .await
            .map_err(|err| OfflineError::Lookup(format!("{err:?}")))?;
        if found.is_undefined() || found.is_null() {
            return Ok(None);
        }
        Ok(Some(found.unchecked_into::<Response>()))
    }
}

struct BrowserNetwork {
    scope: ServiceWorkerGlobalScope,
}

impl Network<Request, Response> for BrowserNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, OfflineError> {
        JsFuture::from(self.scope.fetch_with_request(request))
            .await
            .map(|value| value.unchecked_into::<Response>())
            .map_err(|err| OfflineError::Network(format!("{err:?}")))
    }
}

fn worker_for(
    scope: &ServiceWorkerGlobalScope,
    config: Option<JsValue>,
) -> Result<OfflineWorker<BrowserCaches>, JsValue> {
    let cfg = parse_config(config)?;
    let caches = BrowserCaches::from_scope(scope)
        .map_err(|err| JsValue::from_str(&format_offline_error(err)))?;
    Ok(OfflineWorker::new(caches, AssetManifest::from(&cfg)))
}

/// Dùng trong sự kiện `install`: `event.waitUntil(installAssets())`.
#[wasm_bindgen(js_name = installAssets)]
pub fn install_assets(config: Option<JsValue>) -> Promise {
    future_to_promise(async move {
        let scope = scope().map_err(|err| JsValue::from_str(&format_offline_error(err)))?;
        let worker = worker_for(&scope, config)?;
        if let Err(err) = worker.install().await {
            let message = format_offline_error(err);
            console::error_1(&JsValue::from_str(&message));
            return Err(JsValue::from_str(&message));
        }
        console::log_1(&"Opened cache".into());
        Ok(JsValue::UNDEFINED)
    })
}

/// Dùng trong sự kiện `fetch`: `event.respondWith(handleFetch(event.request))`.
#[wasm_bindgen(js_name = handleFetch)]
pub fn handle_fetch(request: Request, config: Option<JsValue>) -> Promise {
    future_to_promise(async move {
        let scope = scope().map_err(|err| JsValue::from_str(&format_offline_error(err)))?;
        let worker = worker_for(&scope, config)?;
        let network = BrowserNetwork { scope };
        let outcome = worker
            .handle_fetch(&request, &network)
            .await
            .map_err(|err| JsValue::from_str(&format_offline_error(err)))?;
        Ok(outcome.response.into())
    })
}
