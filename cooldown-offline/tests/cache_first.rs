use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use cooldown_offline::{
    AssetCache, AssetManifest, CacheStorage, Network, OfflineError, OfflineWorker,
    ResponseSource,
};
use futures::executor::block_on;

type Buckets = Rc<RefCell<BTreeMap<String, BTreeMap<String, String>>>>;

/// Máy chủ giả: chỉ phục vụ các URL có trong `available`.
#[derive(Clone, Default)]
struct FakeOrigin {
    available: Rc<RefCell<BTreeSet<String>>>,
    hits: Rc<Cell<usize>>,
}

impl FakeOrigin {
    fn serving(urls: &[&str]) -> Self {
        let origin = Self::default();
        origin
            .available
            .borrow_mut()
            .extend(urls.iter().map(|url| url.to_string()));
        origin
    }

    fn body(url: &str) -> String {
        format!("body of {url}")
    }
}

impl Network<String, String> for FakeOrigin {
    async fn fetch(&self, request: &String) -> Result<String, OfflineError> {
        self.hits.set(self.hits.get() + 1);
        if self.available.borrow().contains(request) {
            Ok(Self::body(request))
        } else {
            Err(OfflineError::Network(format!("404 {request}")))
        }
    }
}

struct FakeCache {
    name: String,
    buckets: Buckets,
    origin: FakeOrigin,
}

impl AssetCache for FakeCache {
    type Request = String;
    type Response = String;

    async fn add_all(&self, urls: &[String]) -> Result<(), OfflineError> {
        let mut fetched = BTreeMap::new();
        for url in urls {
            let body = self
                .origin
                .fetch(url)
                .await
                .map_err(|err| OfflineError::Populate {
                    url: url.clone(),
                    reason: err.to_string(),
                })?;
            fetched.insert(url.clone(), body);
        }
        self.buckets
            .borrow_mut()
            .entry(self.name.clone())
            .or_default()
            .extend(fetched);
        Ok(())
    }

    async fn lookup(&self, request: &String) -> Result<Option<String>, OfflineError> {
        Ok(self
            .buckets
            .borrow()
            .get(&self.name)
            .and_then(|bucket| bucket.get(request).cloned()))
    }
}

#[derive(Clone, Default)]
struct FakeStorage {
    buckets: Buckets,
    origin: FakeOrigin,
}

impl CacheStorage for FakeStorage {
    type Cache = FakeCache;

    async fn open(&self, name: &str) -> Result<FakeCache, OfflineError> {
        self.buckets.borrow_mut().entry(name.to_string()).or_default();
        Ok(FakeCache {
            name: name.to_string(),
            buckets: self.buckets.clone(),
            origin: self.origin.clone(),
        })
    }
}

fn manifest() -> AssetManifest {
    AssetManifest::default()
}

fn all_assets() -> Vec<&'static str> {
    vec![".", "index.html", "style.css", "script.js", "icon-192.png", "icon-512.png"]
}

#[test]
fn install_populates_every_manifest_entry() {
    let origin = FakeOrigin::serving(&all_assets());
    let storage = FakeStorage {
        origin,
        ..FakeStorage::default()
    };
    let worker = OfflineWorker::new(storage.clone(), manifest());

    block_on(worker.install()).expect("install phải thành công");

    let buckets = storage.buckets.borrow();
    let bucket = &buckets["cooldown-timers-cache-v1"];
    assert_eq!(bucket.len(), 6);
    assert_eq!(bucket["style.css"], "body of style.css");
}

#[test]
fn install_fails_when_any_asset_is_unreachable() {
    let origin = FakeOrigin::serving(&[".", "index.html", "style.css", "script.js"]);
    let storage = FakeStorage {
        origin,
        ..FakeStorage::default()
    };
    let worker = OfflineWorker::new(storage.clone(), manifest());

    let err = block_on(worker.install()).unwrap_err();

    assert!(matches!(err, OfflineError::Populate { ref url, .. } if url == "icon-192.png"));
    assert!(storage.buckets.borrow()["cooldown-timers-cache-v1"].is_empty());
}

#[test]
fn cached_request_never_touches_network() {
    let origin = FakeOrigin::serving(&all_assets());
    let storage = FakeStorage {
        origin: origin.clone(),
        ..FakeStorage::default()
    };
    let worker = OfflineWorker::new(storage, manifest());
    block_on(worker.install()).unwrap();
    let hits_after_install = origin.hits.get();

    // Mất mạng: origin không còn phục vụ gì.
    let offline = FakeOrigin::default();
    let outcome = block_on(worker.handle_fetch(&"index.html".to_string(), &offline)).unwrap();

    assert_eq!(outcome.source, ResponseSource::Cache);
    assert_eq!(outcome.response, "body of index.html");
    assert_eq!(offline.hits.get(), 0);
    assert_eq!(origin.hits.get(), hits_after_install);
}

#[test]
fn cache_miss_falls_back_to_network_without_caching() {
    let origin = FakeOrigin::serving(&["api/extra.json"]);
    let storage = FakeStorage::default();
    let worker = OfflineWorker::new(storage.clone(), manifest());
    let request = "api/extra.json".to_string();

    let first = block_on(worker.handle_fetch(&request, &origin)).unwrap();
    let second = block_on(worker.handle_fetch(&request, &origin)).unwrap();

    assert_eq!(first.source, ResponseSource::Network);
    assert_eq!(second.source, ResponseSource::Network);
    assert_eq!(origin.hits.get(), 2);
    assert!(storage.buckets.borrow()["cooldown-timers-cache-v1"].is_empty());
}

#[test]
fn network_error_propagates_on_miss() {
    let worker = OfflineWorker::new(FakeStorage::default(), manifest());
    let err = block_on(worker.handle_fetch(&"missing.png".to_string(), &FakeOrigin::default()))
        .unwrap_err();
    assert!(matches!(err, OfflineError::Network(_)));
}

#[test]
fn default_manifest_assets_ship_with_web_bundle() {
    let web_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../web");
    for url in manifest().urls.iter().filter(|url| url.as_str() != ".") {
        assert!(web_dir.join(url).is_file(), "thiếu tài nguyên {url} trong web/");
    }
}
