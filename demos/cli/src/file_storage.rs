use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cooldown_core::{KeyValueStore, StorageError};

/// Kho key-value ghi toàn bộ bảng vào một file JSON, thay cho `localStorage`.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|err| {
                StorageError::Unavailable(format!("{}: {err}", self.path.display()))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(StorageError::Unavailable(format!(
                "{}: {err}",
                self.path.display()
            ))),
        }
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // File hỏng thì ghi đè bằng bảng mới.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());

        let write_err = |err: std::io::Error| {
            StorageError::Write(format!("{}: {err}", self.path.display()))
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let encoded = serde_json::to_string_pretty(&map)
            .map_err(|err| StorageError::Write(err.to_string()))?;
        fs::write(&self.path, encoded).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get("cooldownTimers").unwrap(), None);
    }

    #[test]
    fn set_creates_parent_dirs_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested/store.json"));
        storage.set("theme", "dark").unwrap();
        storage.set("cooldownTimers", "[]").unwrap();

        let reopened = FileStorage::new(storage.path().to_path_buf());
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("cooldownTimers").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn corrupt_file_is_reported_then_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();
        let mut storage = FileStorage::new(&path);

        assert!(matches!(
            storage.get("theme"),
            Err(StorageError::Unavailable(_))
        ));
        storage.set("theme", "light").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("light"));
    }
}
