//! Browser LocalStorage backend (wasm32 only)

use super::KeyValueStore;
use crate::error::{StorageError, StorageResult};

/// `window.localStorage`, or nothing when the browser refuses access.
///
/// An unavailable storage still accepts calls; they fail with
/// [`StorageError::Unavailable`] and the store keeps working in memory.
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = crate::platform::local_storage();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, todos will not survive a reload");
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn inner(&self) -> StorageResult<&web_sys::Storage> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

fn js_reason(err: wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner()?
            .get_item(key)
            .map_err(|err| StorageError::Read {
                key: key.to_string(),
                reason: js_reason(err),
            })
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.inner()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: js_reason(err),
            })
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.inner()?
            .remove_item(key)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: js_reason(err),
            })
    }
}
