//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::feed::FeedConfig;
use crate::relay::OriginPolicy;
use crate::store::DEFAULT_NAMESPACE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the game list comes from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// URL (`http://`, `https://`) or path of `games.json`
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_location() -> String {
    "games/games.json".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

/// Local store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Prefix of every stored key
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_db_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("swipefeed").join("store.db").to_string_lossy().to_string())
        .unwrap_or_else(|| "./swipefeed_data/store.db".to_string())
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            namespace: default_namespace(),
        }
    }
}

impl StoreConfig {
    /// Database path with a leading `~/` expanded to the home directory
    pub fn resolved_db_path(&self) -> PathBuf {
        match (self.db_path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.db_path),
        }
    }
}

/// Score relay configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayConfig {
    /// Origins allowed to post score messages
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl RelayConfig {
    pub fn policy(&self) -> OriginPolicy {
        OriginPolicy::allow(&self.allowed_origins)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
        config.feed.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("swipefeed").join("config.toml")),
            Some(PathBuf::from("./swipefeed.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(location) = var("SWIPEFEED_SOURCE") {
            self.source.location = location;
        }

        // Feed overrides; unparsable or invalid values are ignored
        if let Some(size) = var("SWIPEFEED_BATCH_SIZE").and_then(|v| v.parse().ok()) {
            if size > 0 {
                self.feed.batch_size = size;
            }
        }
        if let Some(max) = var("SWIPEFEED_MAX_LIVE").and_then(|v| v.parse().ok()) {
            self.feed.max_live_items = max;
        }
        if let Some(policy) = var("SWIPEFEED_END_POLICY").and_then(|v| v.parse().ok()) {
            self.feed.end_policy = policy;
        }

        // Store overrides
        if let Some(db_path) = var("SWIPEFEED_DB_PATH") {
            self.store.db_path = db_path;
        }
        if let Some(namespace) = var("SWIPEFEED_NAMESPACE") {
            self.store.namespace = namespace;
        }

        // Logging overrides
        if let Some(level) = var("SWIPEFEED_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SWIPEFEED_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# SwipeFeed Configuration
#
# Environment variables override these settings:
# - SWIPEFEED_SOURCE
# - SWIPEFEED_BATCH_SIZE
# - SWIPEFEED_MAX_LIVE
# - SWIPEFEED_END_POLICY
# - SWIPEFEED_DB_PATH
# - SWIPEFEED_NAMESPACE
# - SWIPEFEED_LOG_LEVEL
# - SWIPEFEED_LOG_FORMAT

[source]
# URL or path of the game list
location = "games/games.json"

[feed]
# Cards appended per batch
batch_size = 3

# Live cards kept before the oldest are pruned (0 = never prune)
max_live_items = 12

# At the end of the list: "loop" back to the start or "stop"
end_policy = "loop"

# "frame" embeds each game, "image" shows its cover
render_mode = "frame"

[feed.visibility]
# Fraction of the last card that must be visible to load more
intersection_ratio = 0.6

# Distance from the bottom (px) that counts as reaching the end
scroll_margin_px = 200.0

[store]
# SQLite database holding votes and notes
db_path = "~/.local/share/swipefeed/store.db"

# Prefix of every stored key
namespace = "swipefeed"

[relay]
# Origins allowed to post score messages (empty = accept none)
allowed_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::EndPolicy;
    use std::collections::HashMap;

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.feed.batch_size, 3);
        assert_eq!(config.feed.max_live_items, 12);
        assert_eq!(config.feed.end_policy, EndPolicy::Loop);
        assert_eq!(config.store.namespace, "swipefeed");
        assert!(config.relay.allowed_origins.is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[feed]\nend_policy = \"stop\"\n").unwrap();
        assert_eq!(config.feed.end_policy, EndPolicy::Stop);
        assert_eq!(config.feed.batch_size, 3);
        assert_eq!(config.source.location, "games/games.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_feed_config_rejected() {
        assert!(Config::parse("[feed]\nbatch_size = 0\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SWIPEFEED_SOURCE", "https://example.com/games.json"),
            ("SWIPEFEED_BATCH_SIZE", "5"),
            ("SWIPEFEED_MAX_LIVE", "0"),
            ("SWIPEFEED_END_POLICY", "stop"),
            ("SWIPEFEED_NAMESPACE", "ttg"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.source.location, "https://example.com/games.json");
        assert_eq!(config.feed.batch_size, 5);
        assert_eq!(config.feed.max_live_items, 0);
        assert_eq!(config.feed.end_policy, EndPolicy::Stop);
        assert_eq!(config.store.namespace, "ttg");
    }

    #[test]
    fn test_bad_env_values_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|name| match name {
            "SWIPEFEED_BATCH_SIZE" => Some("0".to_string()),
            "SWIPEFEED_END_POLICY" => Some("bounce".to_string()),
            _ => None,
        });
        assert_eq!(config.feed.batch_size, 3);
        assert_eq!(config.feed.end_policy, EndPolicy::Loop);
    }

    #[test]
    fn test_db_path_expansion() {
        let store = StoreConfig {
            db_path: "/tmp/swipefeed/store.db".to_string(),
            namespace: default_namespace(),
        };
        assert_eq!(store.resolved_db_path(), PathBuf::from("/tmp/swipefeed/store.db"));

        if let Some(home) = dirs::home_dir() {
            let store = StoreConfig {
                db_path: "~/feed.db".to_string(),
                namespace: default_namespace(),
            };
            assert_eq!(store.resolved_db_path(), home.join("feed.db"));
        }
    }

    #[test]
    fn test_relay_policy_from_config() {
        let config = Config::parse("[relay]\nallowed_origins = [\"https://a.example\"]\n").unwrap();
        assert!(config.relay.policy().allows("https://a.example"));
        assert!(!config.relay.policy().allows("https://b.example"));
    }
}
