//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$INBOXSHELL_CONFIG` (environment variable)
//! 2. `~/.config/inboxshell/config.toml` (Linux/macOS)
//!    `%APPDATA%\inboxshell\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default WebSocket endpoint of the mail web server.
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8787";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Server connection settings.
    pub server: ServerConfig,
    /// Compose form settings.
    pub compose: ComposeConfig,
    /// Display settings.
    pub display: DisplayConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// UI language ("en", "es"). Empty means detect from the environment.
    pub language: String,
}

/// Server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// WebSocket URL of the mail web server.
    pub url: String,
    /// Flat delay between a close event and the next connection attempt.
    pub reconnect_delay_ms: u64,
    /// Upper bound on a single connection handshake.
    pub connect_timeout_ms: u64,
    /// How long headless commands wait for a reply.
    pub reply_timeout_ms: u64,
}

/// Compose form settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// How long the send control stays disabled after a send.
    pub send_cooldown_ms: u64,
    /// Sender address pre-filled into a fresh compose form.
    pub default_sender: Option<String>,
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Lifetime of success/error status messages.
    pub status_ttl_ms: u64,
    /// Event loop tick interval.
    pub tick_rate_ms: u64,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "warn".to_string(),
            language: String::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            reconnect_delay_ms: 3000,
            connect_timeout_ms: 10_000,
            reply_timeout_ms: 15_000,
        }
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            send_cooldown_ms: 2000,
            default_sender: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            status_ttl_ms: 5000,
            tick_rate_ms: 100,
        }
    }
}

// ── Timings ─────────────────────────────────────────────────────

/// The fixed delays that drive the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub reconnect_delay: Duration,
    pub send_cooldown: Duration,
    pub status_ttl: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            reconnect_delay: Duration::from_millis(3000),
            send_cooldown: Duration::from_millis(2000),
            status_ttl: Duration::from_millis(5000),
        }
    }
}

impl Config {
    /// Session timings derived from this configuration.
    pub fn timings(&self) -> Timings {
        Timings {
            reconnect_delay: Duration::from_millis(self.server.reconnect_delay_ms),
            send_cooldown: Duration::from_millis(self.compose.send_cooldown_ms),
            status_ttl: Duration::from_millis(self.display.status_ttl_ms),
        }
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Save configuration to the standard location.
pub fn save_config(config: &Config) -> anyhow::Result<()> {
    let path = config_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config file path"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), "Saved config");
    Ok(())
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("INBOXSHELL_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    dirs::config_dir().map(|d| d.join("inboxshell").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inboxshell")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    cache_dir(config).join("inboxshell.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.server.url, "ws://localhost:8787");
        assert_eq!(cfg.server.reconnect_delay_ms, 3000);
        assert_eq!(cfg.compose.send_cooldown_ms, 2000);
        assert_eq!(cfg.display.status_ttl_ms, 5000);
        assert_eq!(cfg.general.log_level, "warn");
    }

    #[test]
    fn test_default_timings_match_config() {
        assert_eq!(Config::default().timings(), Timings::default());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.server.url, cfg.server.url);
        assert_eq!(parsed.display.tick_rate_ms, cfg.display.tick_rate_ms);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[server]
url = "ws://mail.internal:9000"

[compose]
default_sender = "me@example.com"
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.server.url, "ws://mail.internal:9000");
        assert_eq!(cfg.compose.default_sender.as_deref(), Some("me@example.com"));
        // Other fields use defaults
        assert_eq!(cfg.server.reconnect_delay_ms, 3000);
        assert_eq!(cfg.compose.send_cooldown_ms, 2000);
    }

    #[test]
    fn test_log_file_lives_in_cache_dir() {
        let mut cfg = Config::default();
        cfg.general.cache_dir = Some(PathBuf::from("/tmp/inboxshell-test"));
        assert_eq!(
            log_file_path(&cfg),
            PathBuf::from("/tmp/inboxshell-test/inboxshell.log")
        );
    }
}
