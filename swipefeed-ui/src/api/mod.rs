//! Game List API
//!
//! Fetching `games.json` from the page's host.

pub mod client;

pub use client::{fetch_games, games_url};
