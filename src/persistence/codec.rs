//! JSON encoding of the todo collection
//!
//! `[{"id": 1, "text": "...", "complete": false}, ...]` in collection order.

use std::collections::HashSet;

use crate::error::{StorageError, StorageResult};
use crate::todo::Todo;

pub fn encode(todos: &[Todo]) -> StorageResult<String> {
    serde_json::to_string(todos).map_err(StorageError::Encode)
}

/// Decode a stored collection. A payload with repeated ids is rejected as a
/// whole; there is no partial recovery.
pub fn decode(json: &str) -> StorageResult<Vec<Todo>> {
    let todos: Vec<Todo> = serde_json::from_str(json).map_err(StorageError::Decode)?;

    let mut seen = HashSet::with_capacity(todos.len());
    for todo in &todos {
        if !seen.insert(todo.id) {
            return Err(StorageError::DuplicateId(todo.id));
        }
    }

    Ok(todos)
}
