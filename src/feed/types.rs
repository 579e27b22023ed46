//! Core data types for the feed
//!
//! - `GameRecord`: one entry of the loaded game list
//! - `RenderMode`: how cards present their location (iframe or image)
//! - `RenderedItem`: a card currently alive in the presentation layer
//! - `FeedCursor`: position of the next record to render

use serde::{Deserialize, Serialize};

/// A single game from `games.json`
///
/// Immutable once loaded. The `id` is always populated: records without an
/// explicit id fall back to their location, then to their title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    /// Stable identifier used for counters and notes
    pub id: String,
    /// Display title
    pub title: String,
    /// Frame URL / path, or cover image URL depending on [`RenderMode`]
    pub location: String,
    /// Optional author credit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl GameRecord {
    /// Create a record whose id is derived from its location
    pub fn new(title: impl Into<String>, location: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            id: location.clone(),
            title: title.into(),
            location,
            author: None,
        }
    }

    /// Builder method: set an explicit id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder method: set the author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// How a card presents its game
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Embed the game in an iframe (`url`, falling back to `path`)
    #[default]
    Frame,
    /// Show a cover image (`cover`, falling back to `url`)
    Image,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Frame => write!(f, "frame"),
            RenderMode::Image => write!(f, "image"),
        }
    }
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "frame" | "iframe" => Ok(RenderMode::Frame),
            "image" | "cover" => Ok(RenderMode::Image),
            other => Err(format!("Unknown render mode: {}", other)),
        }
    }
}

/// Unique key of a rendered card within one paginator
///
/// Keys are handed out in creation order, so comparing keys compares age.
pub type ItemKey = u64;

/// A card alive in the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    /// Creation-order key, distinct even when a looping feed renders a game twice
    pub key: ItemKey,
    /// Index of the game in the loaded list
    pub index: usize,
    /// The rendered game
    pub game: GameRecord,
}

/// Position of the next record to render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedCursor {
    pub next_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_record_builder() {
        let game = GameRecord::new("Snake", "games/snake/index.html");
        assert_eq!(game.id, "games/snake/index.html");

        let game = game.id("snake").author("ana");
        assert_eq!(game.id, "snake");
        assert_eq!(game.author.as_deref(), Some("ana"));
    }

    #[test]
    fn test_render_mode_parse() {
        assert_eq!("frame".parse::<RenderMode>().unwrap(), RenderMode::Frame);
        assert_eq!("Cover".parse::<RenderMode>().unwrap(), RenderMode::Image);
        assert!("video".parse::<RenderMode>().is_err());
    }

    #[test]
    fn test_game_record_serializes_without_author() {
        let json = serde_json::to_string(&GameRecord::new("Pong", "pong.html")).unwrap();
        assert!(!json.contains("author"));
    }
}
