//! Local Stores
//!
//! Vote counters and notes backed by `window.localStorage`.

use leptos::*;

use swipefeed::store::{
    CounterStore, KeyValueStore, NoteStore, StoreError, StoreResult, DEFAULT_NAMESPACE,
};

/// `window.localStorage` as a key-value store
///
/// Holds `None` when storage is unavailable (private mode, disabled cookies);
/// every operation then fails with a backend error instead of panicking.
#[derive(Clone)]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    /// Open the window's local storage
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&"localStorage unavailable; votes and notes will not be saved".into());
        }
        Self { storage }
    }

    /// A store with no backing storage
    pub fn unavailable() -> Self {
        Self { storage: None }
    }

    fn storage(&self) -> StoreResult<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Backend("localStorage unavailable".to_string()))
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Backend(format!("{:?}", e))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        // Fails with QuotaExceededError when storage is full
        self.storage()?.set_item(key, value).map_err(js_error)
    }
}

/// Counter and note stores sharing one localStorage handle
#[derive(Clone)]
pub struct FeedStores {
    pub counters: CounterStore<LocalStore>,
    pub notes: NoteStore<LocalStore>,
}

impl FeedStores {
    pub fn new(store: LocalStore) -> Self {
        Self {
            counters: CounterStore::with_namespace(store.clone(), DEFAULT_NAMESPACE),
            notes: NoteStore::with_namespace(store, DEFAULT_NAMESPACE),
        }
    }
}

/// Provide the stores to the component tree
pub fn provide_stores() {
    provide_context(FeedStores::new(LocalStore::open()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipefeed::store::VoteCategory;

    #[test]
    fn test_unavailable_store_reports_errors() {
        let stores = FeedStores::new(LocalStore::unavailable());
        assert!(matches!(
            stores.counters.increment(VoteCategory::Up, "snake"),
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(
            stores.notes.append("snake", "hi"),
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(
            stores.notes.append("snake", "   "),
            Err(StoreError::EmptyNote)
        ));
    }
}
