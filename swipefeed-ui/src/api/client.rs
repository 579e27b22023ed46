//! HTTP Client
//!
//! Loads the game list once per session with `gloo-net`.

use gloo_net::http::Request;

use swipefeed::feed::{GameRecord, RenderMode};
use swipefeed::loader::{parse_games, LoadError, LoadResult};

/// Default location of the game list, relative to the page
pub const DEFAULT_GAMES_URL: &str = "games/games.json";

/// localStorage key overriding [`DEFAULT_GAMES_URL`]
const GAMES_URL_KEY: &str = "swipefeed_games_url";

/// Get the game list URL from local storage or use default
pub fn games_url() -> String {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(GAMES_URL_KEY).ok().flatten())
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_GAMES_URL.to_string())
}

/// Fetch and parse the game list
///
/// Any failure is terminal; the caller shows [`LoadError::user_message`].
pub async fn fetch_games(mode: RenderMode) -> LoadResult<Vec<GameRecord>> {
    let url = games_url();

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(LoadError::Status {
            status: response.status(),
            url,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    parse_games(&body, mode)
}
