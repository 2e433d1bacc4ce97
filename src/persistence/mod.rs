//! Todo persistence
//!
//! Features:
//! - Synchronous key-value backend trait (LocalStorage on web, memory elsewhere)
//! - One fixed slot holding the whole collection as JSON
//! - Absent or corrupt slot loads as an empty collection

pub mod codec;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;
pub use memory::MemoryStorage;

use crate::error::StorageResult;
use crate::todo::Todo;

/// Synchronous string key-value storage, shaped after `window.localStorage`
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

/// Reads and writes the todo collection under a single key
#[derive(Debug)]
pub struct TodoRepository<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> TodoRepository<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Overwrite the slot with the full collection
    pub fn save(&mut self, todos: &[Todo]) -> StorageResult<()> {
        let json = codec::encode(todos)?;
        self.storage.set_item(&self.key, &json)?;
        log::debug!("Saved {} todos to {:?}", todos.len(), self.key);
        Ok(())
    }

    /// Stored collection, `Ok(None)` when the slot is empty
    pub fn try_load(&self) -> StorageResult<Option<Vec<Todo>>> {
        match self.storage.get_item(&self.key)? {
            Some(json) => codec::decode(&json).map(Some),
            None => Ok(None),
        }
    }

    /// Stored collection, or empty if absent, unreadable or corrupt
    pub fn load(&self) -> Vec<Todo> {
        match self.try_load() {
            Ok(Some(todos)) => {
                log::info!("Loaded {} todos", todos.len());
                todos
            }
            Ok(None) => {
                log::info!("No saved todos found, starting fresh");
                Vec::new()
            }
            Err(err) => {
                log::warn!("Discarding saved todos: {err}");
                Vec::new()
            }
        }
    }

    /// Drop the slot entirely
    pub fn clear(&mut self) -> StorageResult<()> {
        self.storage.remove_item(&self.key)
    }
}
