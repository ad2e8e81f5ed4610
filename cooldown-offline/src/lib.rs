//! Bộ đệm tài nguyên tĩnh kiểu cache-first cho chế độ offline.
//!
//! Logic ở đây không phụ thuộc trình duyệt: `CacheStorage`, `AssetCache` và
//! `Network` là các ranh giới mà service worker (hoặc bản giả lập khi test) cài đặt.

#![allow(async_fn_in_trait)]

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Tên bucket mặc định. Đổi danh sách tài nguyên thì phải tăng phiên bản.
pub const DEFAULT_CACHE_NAME: &str = "cooldown-timers-cache-v1";

/// Danh sách cố định các tài nguyên được đệm khi cài đặt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetManifest {
    pub cache_name: String,
    pub urls: Vec<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            cache_name: DEFAULT_CACHE_NAME.to_string(),
            urls: [
                ".",
                "index.html",
                "style.css",
                "script.js",
                "icon-192.png",
                "icon-512.png",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfflineError {
    #[error("Không mở được cache {name}: {reason}")]
    Open { name: String, reason: String },
    #[error("Không đệm được tài nguyên {url}: {reason}")]
    Populate { url: String, reason: String },
    #[error("Tra cứu cache thất bại: {0}")]
    Lookup(String),
    #[error("Yêu cầu mạng thất bại: {0}")]
    Network(String),
}

/// Một bucket cache đã mở.
pub trait AssetCache {
    type Request;
    type Response;

    /// Tải và lưu mọi URL; thất bại nếu bất kỳ URL nào lỗi.
    async fn add_all(&self, urls: &[String]) -> Result<(), OfflineError>;

    async fn lookup(&self, request: &Self::Request) -> Result<Option<Self::Response>, OfflineError>;
}

/// Kho các bucket cache theo tên.
pub trait CacheStorage {
    type Cache: AssetCache;

    async fn open(&self, name: &str) -> Result<Self::Cache, OfflineError>;
}

/// Đường mạng thông thường.
pub trait Network<Req, Resp> {
    async fn fetch(&self, request: &Req) -> Result<Resp, OfflineError>;
}

/// Nguồn trả về phản hồi.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Cache,
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome<R> {
    pub response: R,
    pub source: ResponseSource,
}

type RequestOf<S> = <<S as CacheStorage>::Cache as AssetCache>::Request;
type ResponseOf<S> = <<S as CacheStorage>::Cache as AssetCache>::Response;

/// Hai móc vòng đời của service worker: `install` và `fetch`.
#[derive(Debug, Clone)]
pub struct OfflineWorker<S> {
    storage: S,
    manifest: AssetManifest,
}

impl<S: CacheStorage> OfflineWorker<S> {
    pub fn new(storage: S, manifest: AssetManifest) -> Self {
        Self { storage, manifest }
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    /// Mở (hoặc tạo) bucket và đệm toàn bộ danh sách tài nguyên.
    pub async fn install(&self) -> Result<(), OfflineError> {
        let cache = self.storage.open(&self.manifest.cache_name).await?;
        info!(cache = %self.manifest.cache_name, "đã mở cache");
        cache.add_all(&self.manifest.urls).await.map_err(|err| {
            warn!(error = %err, "cài đặt service worker thất bại");
            err
        })?;
        info!(assets = self.manifest.urls.len(), "đã đệm tài nguyên tĩnh");
        Ok(())
    }

    /// Trả bản trong cache nếu có, ngược lại gọi mạng. Phản hồi từ mạng không được ghi vào cache.
    pub async fn handle_fetch<N>(
        &self,
        request: &RequestOf<S>,
        network: &N,
    ) -> Result<FetchOutcome<ResponseOf<S>>, OfflineError>
    where
        N: Network<RequestOf<S>, ResponseOf<S>>,
    {
        let cache = self.storage.open(&self.manifest.cache_name).await?;
        if let Some(response) = cache.lookup(request).await? {
            debug!("phục vụ từ cache");
            return Ok(FetchOutcome {
                response,
                source: ResponseSource::Cache,
            });
        }

        debug!("không có trong cache, gọi mạng");
        let response = network.fetch(request).await?;
        Ok(FetchOutcome {
            response,
            source: ResponseSource::Network,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_manifest_lists_page_assets() {
        let manifest = AssetManifest::default();
        assert_eq!(manifest.cache_name, DEFAULT_CACHE_NAME);
        assert_eq!(manifest.urls.len(), 6);
        assert!(manifest.urls.iter().any(|url| url == "index.html"));
        assert!(manifest.urls.iter().any(|url| url == "icon-512.png"));
    }
}
