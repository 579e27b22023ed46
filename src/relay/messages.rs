//! Cross-frame message types
//!
//! Embedded games post JSON messages to the host page. Only one shape is
//! understood today:
//!
//! ```json
//! {"type": "score", "value": 10, "gameId": "snake"}
//! ```

use serde::{Deserialize, Serialize};

/// Messages sent from an embedded game to the feed
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrameMessage {
    /// Points scored inside a game
    Score {
        /// Points to add to the running total
        value: f64,
        /// Game that scored, when the frame knows its own id
        #[serde(default, rename = "gameId", skip_serializing_if = "Option::is_none")]
        game_id: Option<String>,
    },
}

impl FrameMessage {
    /// Parse a raw message, returning `None` for anything not understood
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str::<FrameMessage>(raw) {
            Ok(FrameMessage::Score { value, .. }) if !value.is_finite() => None,
            Ok(message) => Some(message),
            Err(_) => None,
        }
    }
}

/// Notice shown to the user after a score is relayed
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreNotice {
    /// Resolved game id, if any
    pub game_id: Option<String>,
    /// Points in this message
    pub value: f64,
    /// Running total after this message
    pub total: f64,
}

impl ScoreNotice {
    /// One-line text for a toast or terminal
    pub fn message(&self) -> String {
        match &self.game_id {
            Some(id) => format!("+{} points from {} (total {})", self.value, id, self.total),
            None => format!("+{} points (total {})", self.value, self.total),
        }
    }
}
