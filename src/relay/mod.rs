//! Cross-frame Score Relay
//!
//! Embedded games report scores to the feed with `postMessage`. The relay
//! checks the sender origin against an allowlist, ignores anything that is not
//! a score message, and keeps a single running total.
//!
//! ## Example
//!
//! ```javascript
//! // Inside an embedded game
//! window.parent.postMessage({type: 'score', value: 10, gameId: 'snake'}, '*');
//! ```

mod messages;
mod score;

pub use messages::{FrameMessage, ScoreNotice};
pub use score::{OriginPolicy, RelayOutcome, ScoreRelay};
