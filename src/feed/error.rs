//! Feed error types
//!
//! Feed errors are startup errors: they are raised once when a paginator is
//! built and are never retried.

use thiserror::Error;

/// Errors that can occur when setting up a feed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    /// The game list has no records
    #[error("Feed has no games")]
    EmptyFeed,

    /// The host has nowhere to render cards
    #[error("Render target not found: {0}")]
    MissingRenderTarget(String),

    /// Feed configuration is unusable
    #[error("Invalid feed configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(FeedError::EmptyFeed.to_string(), "Feed has no games");
        assert_eq!(
            FeedError::MissingRenderTarget("feed-container".to_string()).to_string(),
            "Render target not found: feed-container"
        );
    }
}
