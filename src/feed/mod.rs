//! Feed Engine
//!
//! Batch pagination over a loaded game list:
//!
//! - **types**: Core data structures (GameRecord, RenderedItem, FeedCursor)
//! - **paginator**: The paginator, its configuration and the presentation port
//! - **visibility**: Intersection / scroll trigger thresholds
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use swipefeed::feed::*;
//!
//! struct Printer;
//!
//! impl PresentationPort for Printer {
//!     fn render(&mut self, item: &RenderedItem) {
//!         println!("+ {}", item.game.title);
//!     }
//!     fn remove(&mut self, item: &RenderedItem) {
//!         println!("- {}", item.game.title);
//!     }
//!     fn observe_last(&mut self, _item: &RenderedItem) {}
//! }
//!
//! let games = vec![
//!     GameRecord::new("Snake", "games/snake.html"),
//!     GameRecord::new("Pong", "games/pong.html"),
//! ];
//! let mut feed = FeedPaginator::new(games, FeedConfig::new(1), Printer).unwrap();
//! feed.start();
//! feed.on_last_item_visible(VisibilitySignal::Intersection { ratio: 1.0 });
//! assert_eq!(feed.live_count(), 2);
//! ```

pub mod error;
pub mod paginator;
pub mod types;
pub mod visibility;

pub use error::{FeedError, FeedResult};
pub use paginator::{
    BatchPlan, BatchReport, EndPolicy, FeedConfig, FeedPaginator, PresentationPort,
    TriggerOutcome,
};
pub use types::{FeedCursor, GameRecord, ItemKey, RenderMode, RenderedItem};
pub use visibility::{VisibilitySignal, VisibilityThresholds};
