//! Persistence errors
//!
//! None of these reach the user: the store logs them and carries on with
//! whatever it has in memory.

use thiserror::Error;

use crate::todo::TodoId;

#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage backend (e.g. LocalStorage disabled in a private window)
    #[error("storage is unavailable")]
    Unavailable,

    #[error("failed to read key {key:?}: {reason}")]
    Read { key: String, reason: String },

    /// Quota exceeded, security error, injected failure...
    #[error("failed to write key {key:?}: {reason}")]
    Write { key: String, reason: String },

    #[error("failed to encode todos: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("stored todos are malformed: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("stored todos contain duplicate id {0}")]
    DuplicateId(TodoId),
}

pub type StorageResult<T> = Result<T, StorageError>;
