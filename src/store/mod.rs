//! Local Store
//!
//! Vote counters and notes persisted in a flat string key-value store:
//!
//! - **memory**: In-process store for tests and ephemeral sessions
//! - **sqlite**: SQLite-backed store for the native host
//! - **counters**: Up / super / down vote counters
//! - **notes**: Append-only per-game notes
//!
//! # Key layout
//!
//! ```text
//! <namespace>_<category>_<game id>   → "42"
//! <namespace>_comments_<game id>     → [{"text": "...", "date": "..."}]
//! ```
//!
//! Every operation is one read followed by one write with no isolation from
//! other writers. Browser tabs sharing a store may race; the data is cosmetic.

pub mod counters;
pub mod memory;
pub mod notes;
#[cfg(feature = "native")]
pub mod sqlite;

pub use counters::{CounterStore, VoteCategory, VoteCounts};
pub use memory::MemoryStore;
pub use notes::{Note, NoteStore};
#[cfg(feature = "native")]
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Errors that can occur in the local store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend failed to read or write (quota exceeded, disk error, ...)
    #[error("Store backend error: {0}")]
    Backend(String),

    /// A stored value could not be decoded
    #[error("Corrupt value under {key}: {error}")]
    Corrupt { key: String, error: String },

    /// Note text was empty after trimming
    #[error("Note text is empty")]
    EmptyNote,

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal string key-value capability
///
/// Implementations are cheap handles: cloning one shares the underlying
/// storage, so counter and note stores can sit on the same backend.
pub trait KeyValueStore {
    /// Read a value
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Default key namespace
pub const DEFAULT_NAMESPACE: &str = "swipefeed";

pub(crate) fn counter_key(namespace: &str, category: VoteCategory, id: &str) -> String {
    format!("{}_{}_{}", namespace, category, id)
}

pub(crate) fn notes_key(namespace: &str, id: &str) -> String {
    format!("{}_comments_{}", namespace, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(counter_key("ttg", VoteCategory::Super, "snake"), "ttg_super_snake");
        assert_eq!(notes_key("ttg", "snake"), "ttg_comments_snake");
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::Backend("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Store backend error: quota exceeded");
        assert_eq!(StoreError::EmptyNote.to_string(), "Note text is empty");
    }
}
