//! Game list sources
//!
//! Where `games.json` comes from: an HTTP(S) URL or a local file.
//! Each source is fetched exactly once; there is no retry and no timeout.

use async_trait::async_trait;
use std::path::PathBuf;

use super::{parse_games, LoadError, LoadResult};
use crate::feed::{GameRecord, RenderMode};

/// Common trait for game list sources
#[async_trait]
pub trait GameSource: Send + Sync {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    /// Fetch the raw list body
    async fn fetch(&self) -> LoadResult<String>;
}

/// Pick a source for a location string
///
/// `http://` and `https://` locations are fetched over the network,
/// anything else is read from disk.
pub fn open_source(location: &str) -> Box<dyn GameSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// `games.json` served over HTTP
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: &str) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Use a preconfigured client (proxy, TLS, headers)
    pub fn with_client(url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl GameSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> LoadResult<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))
    }
}

/// `games.json` on the local filesystem
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GameSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> LoadResult<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

/// Fetch and parse the game list
pub async fn load_games(source: &dyn GameSource, mode: RenderMode) -> LoadResult<Vec<GameRecord>> {
    let location = source.describe();
    tracing::info!(source = %location, mode = %mode, "Loading game list");

    let result = match source.fetch().await {
        Ok(raw) => parse_games(&raw, mode),
        Err(e) => Err(e),
    };

    match &result {
        Ok(games) => tracing::info!(source = %location, count = games.len(), "Game list loaded"),
        Err(e) => tracing::error!(source = %location, error = %e, "Failed to load game list"),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and return the list URL
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/games.json", addr)
    }

    fn direct_source(url: &str) -> HttpSource {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpSource::with_client(url, client)
    }

    #[tokio::test]
    async fn test_http_error_status_is_terminal() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let err = load_games(&direct_source(&url), RenderMode::Frame)
            .await
            .unwrap_err();
        match &err {
            LoadError::Status { status, url: failed } => {
                assert_eq!(*status, 404);
                assert_eq!(failed, &url);
            }
            other => panic!("Expected Status, got {:?}", other),
        }
        assert_eq!(err.user_message(), "Error loading games.");
    }

    #[tokio::test]
    async fn test_http_empty_list() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]",
        )
        .await;

        let err = load_games(&direct_source(&url), RenderMode::Frame)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Empty));
        assert_eq!(err.user_message(), "No games available.");
    }

    #[tokio::test]
    async fn test_http_loads_games() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 34\r\nConnection: close\r\n\r\n[{\"title\":\"Snake\",\"url\":\"s.html\"}]",
        )
        .await;

        let games = load_games(&direct_source(&url), RenderMode::Frame).await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].location, "s.html");
    }

    #[tokio::test]
    async fn test_http_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/games.json", listener.local_addr().unwrap());
        drop(listener);

        let err = load_games(&direct_source(&url), RenderMode::Frame)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));
        assert_eq!(err.user_message(), "Error loading games.");
    }

    #[tokio::test]
    async fn test_file_source_loads_games() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title": "Snake", "url": "snake.html"}}, {{"title": "Pong", "url": "pong.html"}}]"#
        )
        .unwrap();

        let source = FileSource::new(file.path());
        let games = load_games(&source, RenderMode::Frame).await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[1].title, "Pong");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FileSource::new("/nonexistent/games.json");
        let err = load_games(&source, RenderMode::Frame).await.unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert_eq!(err.user_message(), "Error loading games.");
    }

    #[tokio::test]
    async fn test_empty_file_list() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let source = FileSource::new(file.path());
        let err = load_games(&source, RenderMode::Frame).await.unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn test_open_picks_source() {
        assert_eq!(
            open_source("https://example.com/games.json").describe(),
            "https://example.com/games.json"
        );
        assert_eq!(
            open_source("games/games.json").describe(),
            "games/games.json"
        );
    }
}
