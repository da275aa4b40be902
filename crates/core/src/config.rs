//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// API key required by the /code endpoint, compared for exact equality
    /// against the x-api-key request header. When unset, the comparison can
    /// never succeed and every /code request is rejected.
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            api_key: None,
        }
    }
}

/// Chat-platform bot configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BotConfig {
    /// Discord bot token. Required by the bot binary, unused by the server.
    #[serde(default)]
    pub token: Option<String>,
    /// Register the obf command in a single guild instead of globally.
    /// Guild registration propagates immediately; global registration can
    /// take up to an hour.
    #[serde(default)]
    pub guild_id: Option<u64>,
    /// Directory for transient attachment spool files. Each long reply
    /// briefly materializes one timestamp-named file here.
    #[serde(default = "default_spool_dir")]
    pub spool_dir: PathBuf,
}

fn default_spool_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: None,
            guild_id: None,
            spool_dir: default_spool_dir(),
        }
    }
}

/// Complete application configuration.
///
/// Assembled once at startup (TOML file merged with SHROUD_ environment
/// variables) and passed into the server and bot explicitly; nothing reads
/// the environment after load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Bot configuration.
    #[serde(default)]
    pub bot: BotConfig,
}

impl AppConfig {
    /// Create a test configuration with an injected fake secret.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig {
                bind: "127.0.0.1:0".to_string(),
                api_key: Some("test-api-key".to_string()),
            },
            bot: BotConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1:3000");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn app_config_deserializes_from_empty_document() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(config.server.api_key.is_none());
        assert_eq!(config.bot.spool_dir, PathBuf::from("."));
    }

    #[test]
    fn bot_config_deserializes_partial_fields() {
        let json = r#"{"bot":{"guild_id":42}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.bot.guild_id, Some(42));
        assert!(config.bot.token.is_none());
    }

    #[test]
    fn for_testing_has_a_fake_secret() {
        let config = AppConfig::for_testing();
        assert_eq!(config.server.api_key.as_deref(), Some("test-api-key"));
    }
}
