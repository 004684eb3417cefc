//! relaylog CLI entry point.
//!
//! Sends one message to the console and to Slack, then waits for the
//! delivery queue to drain before exiting.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, warn};

use relaylog::config::{config_path_with, RelayConfig};
use relaylog::{LogSeverity, Logger, SlackClient};

/// Mirror a message to the console and a Slack channel.
#[derive(Parser)]
#[command(name = "relaylog", version, about)]
struct Cli {
    /// Config file (defaults to `$RELAYLOG_CONFIG_PATH` or `~/.relaylog/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Severity: info, start, cron, error, warning, success. Anything else is unstyled.
    #[arg(long, short, default_value = "default")]
    severity: String,

    /// Slack channel ID, overriding the configured one.
    #[arg(long)]
    channel: Option<String>,

    /// Only write to the console.
    #[arg(long)]
    console_only: bool,

    /// Message body. Newlines are kept.
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("failed to read .env: {e}");
        }
    }

    let path = match cli.config {
        Some(path) => path,
        None => config_path_with(|key| std::env::var(key).ok())?,
    };
    let config = RelayConfig::load_from(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    relaylog::logging::init_cli(&config.log_level);
    info!(
        path = %path.display(),
        found = path.is_file(),
        "configuration source"
    );
    debug!(?config, "configuration loaded");

    let severity: LogSeverity = match cli.severity.parse() {
        Ok(severity) => severity,
        Err(never) => match never {},
    };

    let sink = Arc::new(SlackClient::new(config.slack.api_base_url.clone()));
    let logger = Logger::from_config(&config, sink);

    if cli.console_only {
        logger.log(&cli.message, severity);
        return Ok(());
    }

    let token = config
        .slack
        .token
        .clone()
        .context("no Slack token: set RELAYLOG_SLACK_TOKEN or [slack].token")?;
    let channel = cli
        .channel
        .or_else(|| config.slack.channel.clone())
        .context("no Slack channel: pass --channel or set [slack].channel")?;

    logger.full(&cli.message, &token, &channel, severity);

    let stats = logger.flush().await;
    if stats.failed > 0 {
        warn!(failed = stats.failed, "some posts were not delivered");
    }
    Ok(())
}
