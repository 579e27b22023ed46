//! State Management
//!
//! Global application state, localStorage-backed stores and the score relay.

pub mod global;
pub mod relay;
pub mod stores;

pub use global::{provide_global_state, GlobalState};
pub use stores::{provide_stores, FeedStores, LocalStore};
