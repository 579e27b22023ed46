//! Vote counters
//!
//! One non-negative counter per `(category, game id)`. Counters only ever go
//! up by one; there is no decrement and no reset.

use serde::{Deserialize, Serialize};

use super::{counter_key, KeyValueStore, StoreResult, DEFAULT_NAMESPACE};

/// Kind of vote
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteCategory {
    Up,
    Super,
    Down,
}

impl VoteCategory {
    /// Get all categories for iteration
    pub fn all() -> &'static [VoteCategory] {
        &[VoteCategory::Up, VoteCategory::Super, VoteCategory::Down]
    }
}

impl std::fmt::Display for VoteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteCategory::Up => write!(f, "up"),
            VoteCategory::Super => write!(f, "super"),
            VoteCategory::Down => write!(f, "down"),
        }
    }
}

impl std::str::FromStr for VoteCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(VoteCategory::Up),
            "super" | "superup" | "super_up" => Ok(VoteCategory::Super),
            "down" => Ok(VoteCategory::Down),
            other => Err(format!("Unknown vote category: {}", other)),
        }
    }
}

/// All three counters of one game
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct VoteCounts {
    pub up: u64,
    pub super_up: u64,
    pub down: u64,
}

impl VoteCounts {
    pub fn get(&self, category: VoteCategory) -> u64 {
        match category {
            VoteCategory::Up => self.up,
            VoteCategory::Super => self.super_up,
            VoteCategory::Down => self.down,
        }
    }

    pub fn set(&mut self, category: VoteCategory, value: u64) {
        match category {
            VoteCategory::Up => self.up = value,
            VoteCategory::Super => self.super_up = value,
            VoteCategory::Down => self.down = value,
        }
    }
}

/// Counter operations over a key-value store
#[derive(Debug, Clone)]
pub struct CounterStore<S> {
    store: S,
    namespace: String,
}

impl<S: KeyValueStore> CounterStore<S> {
    /// Create a counter store under the default namespace
    pub fn new(store: S) -> Self {
        Self::with_namespace(store, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(store: S, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    /// Current count, 0 when never voted
    ///
    /// A value that does not parse as a non-negative integer counts as 0.
    pub fn get(&self, category: VoteCategory, id: &str) -> StoreResult<u64> {
        let key = counter_key(&self.namespace, category, id);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(0);
        };

        match raw.trim().parse::<u64>() {
            Ok(value) => Ok(value),
            Err(_) => {
                tracing::warn!(key = %key, value = %raw, "Ignoring unparsable counter value");
                Ok(0)
            }
        }
    }

    /// Add one vote and return the new count
    pub fn increment(&self, category: VoteCategory, id: &str) -> StoreResult<u64> {
        let next = self.get(category, id)?.saturating_add(1);
        let key = counter_key(&self.namespace, category, id);
        self.store.set(&key, &next.to_string())?;

        tracing::debug!(category = %category, game = %id, count = next, "Vote recorded");
        Ok(next)
    }

    /// All counters of one game
    pub fn counts(&self, id: &str) -> StoreResult<VoteCounts> {
        Ok(VoteCounts {
            up: self.get(VoteCategory::Up, id)?,
            super_up: self.get(VoteCategory::Super, id)?,
            down: self.get(VoteCategory::Down, id)?,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};

    #[test]
    fn test_increment_n_times() {
        let counters = CounterStore::new(MemoryStore::new());
        for n in 1..=25 {
            assert_eq!(counters.increment(VoteCategory::Up, "snake").unwrap(), n);
        }
        assert_eq!(counters.get(VoteCategory::Up, "snake").unwrap(), 25);
        assert_eq!(counters.get(VoteCategory::Down, "snake").unwrap(), 0);
        assert_eq!(counters.get(VoteCategory::Up, "pong").unwrap(), 0);
    }

    #[test]
    fn test_stored_as_stringified_integer() {
        let store = MemoryStore::new();
        let counters = CounterStore::with_namespace(store.clone(), "ttg");
        counters.increment(VoteCategory::Super, "snake").unwrap();
        counters.increment(VoteCategory::Super, "snake").unwrap();

        assert_eq!(store.get("ttg_super_snake").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_garbage_value_reads_as_zero() {
        let store = MemoryStore::new();
        store.set("swipefeed_up_snake", "NaN").unwrap();
        store.set("swipefeed_down_snake", "-4").unwrap();

        let counters = CounterStore::new(store);
        assert_eq!(counters.get(VoteCategory::Up, "snake").unwrap(), 0);
        assert_eq!(counters.get(VoteCategory::Down, "snake").unwrap(), 0);
        assert_eq!(counters.increment(VoteCategory::Up, "snake").unwrap(), 1);
    }

    #[test]
    fn test_counts() {
        let counters = CounterStore::new(MemoryStore::new());
        counters.increment(VoteCategory::Up, "a").unwrap();
        counters.increment(VoteCategory::Super, "a").unwrap();
        counters.increment(VoteCategory::Super, "a").unwrap();

        assert_eq!(
            counters.counts("a").unwrap(),
            VoteCounts {
                up: 1,
                super_up: 2,
                down: 0
            }
        );

        let mut counts = counters.counts("a").unwrap();
        counts.set(VoteCategory::Down, 7);
        assert_eq!(counts.get(VoteCategory::Down), 7);
        assert_eq!(counts.get(VoteCategory::Super), 2);
    }

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Backend("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let counters = CounterStore::new(FullStore);
        let err = counters.increment(VoteCategory::Up, "a").unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("SUPER".parse::<VoteCategory>().unwrap(), VoteCategory::Super);
        assert!("sideways".parse::<VoteCategory>().is_err());
        assert_eq!(VoteCategory::all().len(), 3);
    }
}
