//! Configuration loading.
//!
//! Loads `~/.relaylog/config.toml` (or `$RELAYLOG_CONFIG_PATH`).
//! Precedence: env vars > config file > defaults. A missing file is not an
//! error. The minimum dispatch interval is read once, when the queue is
//! built; there is no way to change it afterwards.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::formatter::DEFAULT_MENTION;
use crate::slack::client::DEFAULT_SLACK_API_URL;

// ── Top-level config ────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Delivery queue settings.
    pub queue: QueueConfig,
    /// Slack sink settings.
    pub slack: SlackConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            queue: QueueConfig::default(),
            slack: SlackConfig::default(),
        }
    }
}

impl RelayConfig {
    /// Load from the default path with env overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the home directory cannot be determined.
    pub fn load() -> Result<Self> {
        let path = config_path_with(|key| std::env::var(key).ok())?;
        Self::load_from(&path)
    }

    /// Load from an explicit path with env overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                toml::from_str(&contents)
                    .with_context(|| format!("failed to parse config at {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "failed to read config at {}: {e}",
                path.display()
            )),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Takes a resolver so tests never touch the process environment.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("RELAYLOG_LOG_LEVEL") {
            self.log_level = v;
        }

        if let Some(v) = env("RELAYLOG_MIN_INTERVAL_MS") {
            match v.parse() {
                Ok(ms) => self.queue.min_interval_ms = ms,
                Err(_) => tracing::warn!(
                    var = "RELAYLOG_MIN_INTERVAL_MS",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }

        if let Some(v) = env("RELAYLOG_SLACK_API_URL") {
            self.slack.api_base_url = v;
        }
        if let Some(v) = env("RELAYLOG_SLACK_TOKEN") {
            self.slack.token = Some(v);
        }
        if let Some(v) = env("RELAYLOG_SLACK_CHANNEL") {
            self.slack.channel = Some(v);
        }
        if let Some(v) = env("RELAYLOG_SLACK_MENTION") {
            self.slack.mention = v;
        }
    }

    /// Parse a TOML string into config, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid TOML or mismatched types.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("failed to parse config TOML")
    }
}

// ── Queue config ────────────────────────────────────────────────

/// Delivery queue settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Minimum gap between two remote dispatch starts, in milliseconds.
    pub min_interval_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 1000,
        }
    }
}

impl QueueConfig {
    /// Minimum interval as a [`Duration`].
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

// ── Slack config ────────────────────────────────────────────────

/// Slack sink settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Web API base URL.
    pub api_base_url: String,
    /// Default bot token for the CLI.
    pub token: Option<String>,
    /// Default channel ID for the CLI.
    pub channel: Option<String>,
    /// Mention tag used in the error banner.
    pub mention: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_SLACK_API_URL.to_owned(),
            token: None,
            channel: None,
            mention: DEFAULT_MENTION.to_owned(),
        }
    }
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("api_base_url", &self.api_base_url)
            .field("token", &self.token.as_ref().map(|_| "__REDACTED__"))
            .field("channel", &self.channel)
            .field("mention", &self.mention)
            .finish()
    }
}

// ── Paths ───────────────────────────────────────────────────────

/// Resolve the default config directory (`~/.relaylog/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".relaylog"))
}

/// Resolve the config file path using a custom env resolver.
///
/// `$RELAYLOG_CONFIG_PATH` wins, else `~/.relaylog/config.toml`.
///
/// # Errors
///
/// Returns an error if the home directory is needed but cannot be determined.
pub fn config_path_with(env: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    if let Some(p) = env("RELAYLOG_CONFIG_PATH") {
        return Ok(PathBuf::from(p));
    }
    Ok(config_dir()?.join("config.toml"))
}
