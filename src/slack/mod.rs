//! Remote sink: Slack message types, the [`RemoteSink`] seam, and the
//! `chat.postMessage` client.
//!
//! The delivery queue only ever talks to a `dyn RemoteSink`, so tests and
//! other chat backends can stand in for [`client::SlackClient`].

use async_trait::async_trait;
use regex::Regex;

pub mod client;
pub mod message;

pub use client::SlackClient;
pub use message::{Block, OutboundPost, TextObject};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by a remote sink.
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    /// HTTP transport failure.
    #[error("slack request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Slack responded with a non-success HTTP status.
    #[error("slack returned non-success status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        body: String,
    },
    /// Slack accepted the request but reported `"ok": false`.
    #[error("slack API error: {0}")]
    Api(String),
    /// Response body did not match the expected envelope.
    #[error("slack response parse error: {0}")]
    Parse(String),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A destination that accepts one structured post at a time.
///
/// Implementations must be `Send + Sync` so the queue worker can hold them
/// across await points.
#[async_trait]
pub trait RemoteSink: Send + Sync {
    /// Deliver a single post.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError`] on any transport or API failure. Callers do not
    /// inspect the variant.
    async fn send(&self, post: &OutboundPost) -> Result<(), SlackError>;
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const MAX_ERROR_BODY_CHARS: usize = 256;

/// Collapse whitespace, redact Slack tokens, and truncate an error body.
pub(crate) fn sanitize_error_body(raw: &str) -> String {
    let mut sanitized = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Ok(regex) = Regex::new(r"xox[abposr]-[A-Za-z0-9\-]{10,}") {
        sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
    }

    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    sanitized
}
