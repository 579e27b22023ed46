//! Per-game notes
//!
//! Each game has an ordered, append-only list of notes stored as one JSON
//! array. There is no edit, delete or pagination.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use super::{notes_key, KeyValueStore, StoreError, StoreResult, DEFAULT_NAMESPACE};

/// A single note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    /// Trimmed note text
    #[serde(alias = "t")]
    pub text: String,
    /// When the note was written
    #[serde(alias = "d", deserialize_with = "stored_date")]
    pub date: DateTime<Utc>,
}

/// Dates as written by either store generation
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDate {
    Rfc3339(DateTime<Utc>),
    EpochMillis(i64),
    EpochMillisFloat(f64),
}

/// Accepts an RFC 3339 string or epoch milliseconds (legacy `d` entries)
fn stored_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let millis = match StoredDate::deserialize(deserializer)? {
        StoredDate::Rfc3339(date) => return Ok(date),
        StoredDate::EpochMillis(ms) => ms,
        StoredDate::EpochMillisFloat(ms) if ms.is_finite() => ms as i64,
        StoredDate::EpochMillisFloat(ms) => {
            return Err(de::Error::custom(format!("invalid note timestamp {}", ms)))
        }
    };
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| de::Error::custom(format!("note timestamp {} out of range", millis)))
}

/// Note operations over a key-value store
#[derive(Debug, Clone)]
pub struct NoteStore<S> {
    store: S,
    namespace: String,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Create a note store under the default namespace
    pub fn new(store: S) -> Self {
        Self::with_namespace(store, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(store: S, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    /// Notes of one game, oldest first
    pub fn list(&self, id: &str) -> StoreResult<Vec<Note>> {
        let key = notes_key(&self.namespace, id);
        match self.store.get(&key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                key,
                error: e.to_string(),
            }),
        }
    }

    /// Append a note stamped with the current time
    pub fn append(&self, id: &str, text: &str) -> StoreResult<Note> {
        self.append_at(id, text, Utc::now())
    }

    /// Append a note with an explicit timestamp
    ///
    /// Text that is empty after trimming is rejected and nothing is written.
    /// A corrupt existing list is reported, never overwritten.
    pub fn append_at(&self, id: &str, text: &str, date: DateTime<Utc>) -> StoreResult<Note> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyNote);
        }

        let mut notes = self.list(id)?;
        let note = Note {
            text: text.to_string(),
            date,
        };
        notes.push(note.clone());

        let encoded = serde_json::to_string(&notes)?;
        self.store.set(&notes_key(&self.namespace, id), &encoded)?;

        tracing::debug!(game = %id, total = notes.len(), "Note appended");
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_append_and_list_in_order() {
        let notes = NoteStore::new(MemoryStore::new());
        notes.append_at("snake", "  fun  ", at(1_700_000_000)).unwrap();
        notes.append_at("snake", "too hard", at(1_700_000_100)).unwrap();

        let list = notes.list("snake").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].text, "fun");
        assert_eq!(list[1].text, "too hard");
        assert!(list[0].date < list[1].date);
        assert!(notes.list("pong").unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_note_leaves_store_unchanged() {
        let store = MemoryStore::new();
        let notes = NoteStore::new(store.clone());
        notes.append("snake", "first").unwrap();
        let before = store.snapshot();

        let err = notes.append("snake", "  ").unwrap_err();
        assert!(matches!(err, StoreError::EmptyNote));
        assert_eq!(store.snapshot(), before);

        let empty = MemoryStore::new();
        assert!(NoteStore::new(empty.clone()).append("x", "\n\t").is_err());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_reads_legacy_short_keys() {
        let store = MemoryStore::new();
        store
            .set(
                "ttg_comments_snake",
                r#"[{"t": "old note", "d": "2024-01-02T03:04:05Z"}]"#,
            )
            .unwrap();

        let notes = NoteStore::with_namespace(store.clone(), "ttg");
        notes.append_at("snake", "new note", at(1_800_000_000)).unwrap();

        let list = notes.list("snake").unwrap();
        assert_eq!(list[0].text, "old note");
        assert_eq!(list[1].text, "new note");

        let raw = store.get("ttg_comments_snake").unwrap().unwrap();
        assert!(raw.contains("\"text\":\"old note\""));
    }

    #[test]
    fn test_reads_legacy_millisecond_dates() {
        let store = MemoryStore::new();
        store
            .set(
                "swipefeed_comments_snake",
                r#"[{"t": "old", "d": 1700000000000}, {"t": "older", "d": 1600000000000.0}]"#,
            )
            .unwrap();

        let notes = NoteStore::new(store);
        let list = notes.list("snake").unwrap();
        assert_eq!(list[0].date, at(1_700_000_000));
        assert_eq!(list[1].date, at(1_600_000_000));

        notes.append_at("snake", "new", at(1_800_000_000)).unwrap();
        let list = notes.list("snake").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].date, at(1_700_000_000));
        assert_eq!(list[2].text, "new");
    }

    #[test]
    fn test_corrupt_list_not_overwritten() {
        let store = MemoryStore::new();
        store.set("swipefeed_comments_snake", "not json").unwrap();

        let notes = NoteStore::new(store.clone());
        let err = notes.append("snake", "hello").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert_eq!(
            store.get("swipefeed_comments_snake").unwrap().as_deref(),
            Some("not json")
        );
    }
}
