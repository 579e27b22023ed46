//! UI Components
//!
//! Leptos components for the game feed.

pub mod feed;
pub mod game_card;
pub mod loading;
pub mod notes_panel;
pub mod toast;

pub use feed::Feed;
pub use game_card::GameCard;
pub use loading::{FeedMessage, Loading};
pub use notes_panel::NotesPanel;
pub use toast::Toast;
