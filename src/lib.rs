//! # SwipeFeed
//!
//! An infinite swipe feed of games: a JSON game list is loaded once and
//! rendered as full-screen cards in fixed-size batches as the user scrolls,
//! with local vote counters, per-game notes and a cross-frame score relay.
//!
//! ## Modules
//!
//! - [`feed`]: Batch paginator, presentation port and visibility triggers
//! - [`loader`]: `games.json` parsing (and HTTP / file sources on native)
//! - [`store`]: Key-value store port, vote counters and notes
//! - [`relay`]: Origin-checked score messages from embedded games
//!
//! The `native` feature (on by default) adds configuration, logging, the
//! SQLite store, the console presentation and the `swipefeed` CLI. The WASM
//! front end builds this crate with `default-features = false`.
//!
//! ## Quick Start
//!
//! ```rust
//! use swipefeed::feed::{FeedConfig, FeedPaginator, PresentationPort, RenderedItem};
//! use swipefeed::loader::parse_games;
//! use swipefeed::store::{CounterStore, MemoryStore, VoteCategory};
//!
//! struct Titles(Vec<String>);
//!
//! impl PresentationPort for Titles {
//!     fn render(&mut self, item: &RenderedItem) {
//!         self.0.push(item.game.title.clone());
//!     }
//!     fn remove(&mut self, _item: &RenderedItem) {}
//!     fn observe_last(&mut self, _item: &RenderedItem) {}
//! }
//!
//! let raw = r#"[{"title": "Snake", "url": "snake.html"}, {"title": "Pong", "url": "pong.html"}]"#;
//! let config = FeedConfig::new(2);
//! let games = parse_games(raw, config.render_mode).unwrap();
//!
//! let mut feed = FeedPaginator::new(games, config, Titles(Vec::new())).unwrap();
//! feed.start();
//! assert_eq!(feed.port().0, vec!["Snake", "Pong"]);
//!
//! let votes = CounterStore::new(MemoryStore::new());
//! assert_eq!(votes.increment(VoteCategory::Up, "snake.html").unwrap(), 1);
//! ```

pub mod feed;
pub mod loader;
pub mod relay;
pub mod store;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod console;
#[cfg(feature = "native")]
pub mod logging;

// Re-export top-level types for convenience
pub use feed::{
    EndPolicy, FeedConfig, FeedError, FeedPaginator, GameRecord, PresentationPort, RenderMode,
    RenderedItem, TriggerOutcome, VisibilitySignal,
};

pub use loader::{parse_games, LoadError, LoadResult};

pub use store::{
    CounterStore, KeyValueStore, MemoryStore, Note, NoteStore, StoreError, StoreResult,
    VoteCategory, VoteCounts,
};

pub use relay::{FrameMessage, OriginPolicy, RelayOutcome, ScoreNotice, ScoreRelay};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};

#[cfg(feature = "native")]
pub use store::SqliteStore;
