//! List Loader
//!
//! Turns the raw `games.json` body into an ordered list of [`GameRecord`]s.
//! Loading is all-or-nothing: any failure is terminal for the session and no
//! partial list is ever produced.
//!
//! Native builds also get [`GameSource`] implementations for HTTP URLs and
//! local files.

#[cfg(feature = "native")]
mod source;

#[cfg(feature = "native")]
pub use source::{load_games, open_source, FileSource, GameSource, HttpSource};

use serde::Deserialize;
use thiserror::Error;

use crate::feed::{GameRecord, RenderMode};

/// Errors that can occur while loading the game list
#[derive(Error, Debug)]
pub enum LoadError {
    /// Transport failed before a response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Local file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Body is not a JSON array of game objects
    #[error("Malformed game list: {0}")]
    Malformed(String),

    /// A record lacks a required field
    #[error("Game #{index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// The list parsed but has no games
    #[error("Game list is empty")]
    Empty,
}

impl LoadError {
    /// Static message shown in place of the feed
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::Empty => "No games available.",
            _ => "Error loading games.",
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Malformed(err.to_string())
    }
}

/// Result type alias for loader operations
pub type LoadResult<T> = Result<T, LoadError>;

/// One entry as it appears in `games.json`
#[derive(Debug, Deserialize)]
struct RawGame {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    cover: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RawGame {
    fn into_record(self, index: usize, mode: RenderMode) -> LoadResult<GameRecord> {
        let title = non_blank(self.title).ok_or_else(|| LoadError::InvalidRecord {
            index,
            reason: "missing title".to_string(),
        })?;

        let location = match mode {
            RenderMode::Frame => non_blank(self.url).or_else(|| non_blank(self.path)),
            RenderMode::Image => non_blank(self.cover).or_else(|| non_blank(self.url)),
        }
        .ok_or_else(|| LoadError::InvalidRecord {
            index,
            reason: format!("missing location for {} mode", mode),
        })?;

        let id = non_blank(self.id).unwrap_or_else(|| location.clone());

        Ok(GameRecord {
            id,
            title,
            location,
            author: non_blank(self.author),
        })
    }
}

/// Parse a `games.json` body
///
/// Fails on malformed JSON, on any record without a title or location, and
/// on an empty list.
pub fn parse_games(raw: &str, mode: RenderMode) -> LoadResult<Vec<GameRecord>> {
    let entries: Vec<RawGame> = serde_json::from_str(raw)?;
    if entries.is_empty() {
        return Err(LoadError::Empty);
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.into_record(index, mode))
        .collect()
}
