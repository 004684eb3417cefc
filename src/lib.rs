//! relaylog: mirror log messages to a colorized console and to Slack.
//!
//! Console output is synchronous. Slack posts go through a single-worker
//! [`delivery::DeliveryQueue`] that preserves call order and spaces
//! dispatches by a minimum interval (1s by default).
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use relaylog::{LogSeverity, Logger, RelayConfig, SlackClient};
//!
//! # async fn demo() {
//! let config = RelayConfig::default();
//! let sink = Arc::new(SlackClient::new(config.slack.api_base_url.clone()));
//! let logger = Logger::from_config(&config, sink);
//! logger.full("deploy finished", "xoxb-token", "C0123", LogSeverity::Start);
//! logger.flush().await;
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod console;
pub mod delivery;
pub mod formatter;
pub mod logger;
pub mod logging;
pub mod severity;
pub mod slack;

pub use config::RelayConfig;
pub use logger::Logger;
pub use severity::LogSeverity;
pub use slack::{OutboundPost, RemoteSink, SlackClient, SlackError};
