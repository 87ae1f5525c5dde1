use gloo::storage::{LocalStorage, Storage};

use super::TokenStorage;
use crate::error::{StorageError, StorageResult};

/// Browser `localStorage` backend.
///
/// Entries are stored as bare strings through the raw `Storage` object, so the slot holds
/// exactly the token and stays readable by any other client sharing the origin.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl TokenStorage for BrowserStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| browser_error("get", &err))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| browser_error("set", &err))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| browser_error("remove", &err))
    }
}

fn browser_error(operation: &'static str, err: &impl std::fmt::Debug) -> StorageError {
    StorageError::Browser {
        operation,
        detail: format!("{err:?}"),
    }
}
