//! Public entry points: console-only, remote-only, and both.
//!
//! A [`Logger`] is built once at startup and shared (usually behind an
//! `Arc`) with whatever code needs to log. None of its methods return
//! errors: remote failures are reported on the console by the queue worker.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::console::ConsoleSink;
use crate::delivery::{DeliveryQueue, QueueSnapshot};
use crate::formatter::{console_text, Formatter};
use crate::severity::LogSeverity;
use crate::slack::RemoteSink;

/// Mirrors messages to the console and, through a [`DeliveryQueue`], to Slack.
#[derive(Debug)]
pub struct Logger {
    formatter: Formatter,
    console: ConsoleSink,
    queue: DeliveryQueue,
}

impl Logger {
    /// Assemble a logger from its parts.
    pub fn new(formatter: Formatter, console: ConsoleSink, queue: DeliveryQueue) -> Self {
        Self {
            formatter,
            console,
            queue,
        }
    }

    /// Build a logger from configuration, delivering through `sink`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn from_config(config: &RelayConfig, sink: Arc<dyn RemoteSink>) -> Self {
        let console = ConsoleSink::new();
        Self::new(
            Formatter::new(config.slack.mention.clone()),
            console,
            DeliveryQueue::with_console(sink, config.queue.min_interval(), console),
        )
    }

    /// Write `message` to the console.
    pub fn log(&self, message: &str, severity: LogSeverity) {
        self.console.emit(&console_text(message, severity), severity);
    }

    /// Same as [`Logger::log`].
    pub fn terminal(&self, message: &str, severity: LogSeverity) {
        self.log(message, severity);
    }

    /// Format `message` and queue it for `channel_id`.
    pub fn slack(&self, token: &str, channel_id: &str, message: &str, severity: LogSeverity) {
        let post = self
            .formatter
            .format(message, severity)
            .into_post(token, channel_id);
        self.queue.enqueue(post);
    }

    /// Write to the console, then queue the remote post.
    pub fn full(&self, message: &str, token: &str, channel_id: &str, severity: LogSeverity) {
        let formatted = self.formatter.format(message, severity);
        self.console.emit(&formatted.console_text, severity);
        self.queue.enqueue(formatted.into_post(token, channel_id));
    }

    /// Queue counters.
    pub fn stats(&self) -> QueueSnapshot {
        self.queue.stats()
    }

    /// Wait for every queued post to be attempted, then shut the queue down.
    pub async fn flush(self) -> QueueSnapshot {
        self.queue.flush().await
    }
}
