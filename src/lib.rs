//! Tidy Todos - a single-page todo list
//!
//! Core modules:
//! - `todo`: Todo records and text normalization
//! - `store`: Collection state manager (add/remove/toggle, notifications)
//! - `persistence`: Key-value backends and the JSON slot codec
//! - `platform`: Browser/native platform abstraction
//! - `config`: Storage key, log level and id seeding
//! - `view`: DOM rendering (wasm32 only)

pub mod config;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod store;
pub mod todo;
#[cfg(target_arch = "wasm32")]
pub mod view;

pub use config::{AppConfig, IdSeed, LogLevel};
pub use error::{StorageError, StorageResult};
pub use persistence::{KeyValueStore, MemoryStorage, TodoRepository};
pub use store::{IdAllocator, SubscriptionId, TodoStore};
pub use todo::{Todo, TodoId};

/// App-wide constants
pub mod consts {
    /// LocalStorage slot holding the serialized collection
    pub const STORAGE_KEY: &str = "_$-todos_";
    /// DOM element the app mounts into
    pub const ROOT_ELEMENT_ID: &str = "app";
}
