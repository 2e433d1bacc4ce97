//! Todo records
//!
//! The shape stored in the persistence slot is exactly these three fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique todo identifier (serialized as a bare integer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl TodoId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TodoId)
    }
}

/// A single task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub complete: bool,
}

impl Todo {
    /// Create an incomplete todo
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            complete: false,
        }
    }

    /// Copy of this todo with `complete` flipped
    pub fn toggled(&self) -> Self {
        Self {
            complete: !self.complete,
            ..self.clone()
        }
    }
}

/// Trim candidate text, returning `None` when nothing is left
pub fn normalize_text(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_todo_starts_incomplete() {
        let todo = Todo::new(TodoId(7), "Buy milk");
        assert_eq!(todo.id, TodoId(7));
        assert_eq!(todo.text, "Buy milk");
        assert!(!todo.complete);
    }

    #[test]
    fn test_toggled_only_flips_complete() {
        let todo = Todo::new(TodoId(1), "Walk dog");
        let done = todo.toggled();
        assert!(done.complete);
        assert_eq!(done.id, todo.id);
        assert_eq!(done.text, todo.text);
        assert_eq!(done.toggled(), todo);
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Buy milk \n"), Some("Buy milk"));
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text("   "), None);
        assert_eq!(normalize_text("\t\n"), None);
    }

    #[test]
    fn test_id_serializes_as_plain_integer() {
        let todo = Todo::new(TodoId(1700000000001), "x");
        let json = serde_json::to_string(&todo).unwrap();
        assert_eq!(json, r#"{"id":1700000000001,"text":"x","complete":false}"#);
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!(" 42 ".parse::<TodoId>(), Ok(TodoId(42)));
        assert!("abc".parse::<TodoId>().is_err());
    }
}
