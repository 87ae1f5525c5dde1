use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::TokenStorage;
use crate::error::{StorageError, StorageResult};

/// JSON key/value document on disk, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Store entries in the document at `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(self.io_error("read", source)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| StorageError::Document {
            path: self.path.clone(),
            source,
        })
    }

    fn store(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error("create_dir", source))?;
        }
        let rendered =
            serde_json::to_string_pretty(entries).map_err(|source| StorageError::Document {
                path: self.path.clone(),
                source,
            })?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, rendered).map_err(|source| self.io_error("write", source))?;
        fs::rename(&staging, &self.path).map_err(|source| self.io_error("rename", source))
    }

    fn io_error(&self, operation: &'static str, source: io::Error) -> StorageError {
        StorageError::Io {
            operation,
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.store(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::FileStorage;
    use crate::error::StorageError;
    use crate::storage::TokenStorage;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get("token").expect("get"), None);
        storage.remove("token").expect("remove on missing file");
        assert!(!storage.path().exists());
    }

    #[test]
    fn writes_survive_a_new_handle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("session.json");
        FileStorage::new(&path)
            .set("token", "Basic YWRtaW46aHVudGVyMg==")
            .expect("set");

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get("token").expect("get").as_deref(),
            Some("Basic YWRtaW46aHVudGVyMg==")
        );
        reopened.set("other", "value").expect("set other");
        reopened.remove("token").expect("remove");
        assert_eq!(reopened.get("token").expect("get"), None);
        assert_eq!(reopened.get("other").expect("get").as_deref(), Some("value"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn external_edits_are_observed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let storage = FileStorage::new(&path);
        storage.set("token", "first").expect("set");
        fs::write(&path, r#"{"token":"edited"}"#).expect("external write");
        assert_eq!(storage.get("token").expect("get").as_deref(), Some("edited"));
        fs::remove_file(&path).expect("external delete");
        assert_eq!(storage.get("token").expect("get"), None);
    }

    #[test]
    fn corrupt_document_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").expect("write");
        let err = FileStorage::new(&path).get("token").expect_err("corrupt");
        assert!(matches!(err, StorageError::Document { .. }));
    }
}
