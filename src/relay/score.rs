//! Score relay
//!
//! Accumulates scores posted by embedded games into one running total,
//! kept apart from the per-game vote counters. Senders must come from an
//! allowed origin.

use serde::Deserialize;

use super::messages::{FrameMessage, ScoreNotice};

/// Origins whose messages are accepted
///
/// Matching is exact after lowercasing and dropping a trailing slash. An
/// empty allowlist accepts nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OriginPolicy {
    #[serde(default)]
    allowed: Vec<String>,
}

fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_lowercase()
}

impl OriginPolicy {
    /// Policy accepting exactly these origins
    pub fn allow<I, T>(origins: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            allowed: origins
                .into_iter()
                .map(|o| normalize_origin(o.as_ref()))
                .filter(|o| !o.is_empty())
                .collect(),
        }
    }

    /// Whether a sender origin is accepted
    pub fn allows(&self, origin: &str) -> bool {
        let origin = normalize_origin(origin);
        self.allowed.iter().any(|allowed| normalize_origin(allowed) == origin)
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

/// What the relay did with a message
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// Score added; show the notice
    Accepted(ScoreNotice),
    /// Sender origin not on the allowlist
    RejectedOrigin,
    /// Not a score message
    Ignored,
}

/// Running score total fed by embedded games
#[derive(Debug, Clone)]
pub struct ScoreRelay {
    policy: OriginPolicy,
    total: f64,
    accepted: u64,
}

impl ScoreRelay {
    pub fn new(policy: OriginPolicy) -> Self {
        Self {
            policy,
            total: 0.0,
            accepted: 0,
        }
    }

    /// Handle one raw message
    ///
    /// `frame_game` is the id of the card whose frame sent the message; it is
    /// used when the message carries no `gameId` of its own.
    pub fn receive(&mut self, origin: &str, raw: &str, frame_game: Option<&str>) -> RelayOutcome {
        if !self.policy.allows(origin) {
            tracing::debug!(origin = %origin, "Dropping message from disallowed origin");
            return RelayOutcome::RejectedOrigin;
        }

        let Some(FrameMessage::Score { value, game_id }) = FrameMessage::parse(raw) else {
            tracing::trace!(origin = %origin, "Ignoring unrecognized frame message");
            return RelayOutcome::Ignored;
        };

        let game_id = game_id.or_else(|| frame_game.map(str::to_string));
        self.total += value;
        self.accepted += 1;

        tracing::info!(
            origin = %origin,
            game = ?game_id,
            value,
            total = self.total,
            "Score relayed"
        );

        RelayOutcome::Accepted(ScoreNotice {
            game_id,
            value,
            total: self.total,
        })
    }

    /// Running total of all accepted scores
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of accepted messages
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn policy(&self) -> &OriginPolicy {
        &self.policy
    }
}
