//! HTTP client for the Slack Web API `chat.postMessage` method.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{sanitize_error_body, OutboundPost, RemoteSink, SlackError};

/// Default Slack Web API base URL.
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Response envelope shared by every Slack Web API method.
#[derive(Deserialize)]
struct SlackResponse {
    ok: bool,
    error: Option<String>,
}

/// Posts messages through `chat.postMessage`.
///
/// The client sets no request timeout: a stalled call holds the delivery
/// queue until the connection gives up on its own.
#[derive(Debug, Clone)]
pub struct SlackClient {
    client: reqwest::Client,
    base_url: String,
}

impl SlackClient {
    /// Create a client pointing at the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client for the public Slack API.
    pub fn default_url() -> Self {
        Self::new(DEFAULT_SLACK_API_URL)
    }

    /// Returns the base URL this client posts to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Post one message.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::Request` on transport failure,
    /// `SlackError::HttpStatus` on non-2xx, `SlackError::Api` when Slack
    /// answers `"ok": false`, and `SlackError::Parse` for an unreadable body.
    pub async fn post_message(&self, post: &OutboundPost) -> Result<(), SlackError> {
        let url = format!("{}/chat.postMessage", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&post.token)
            .json(post)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SlackError::HttpStatus {
                status: status.as_u16(),
                body: sanitize_error_body(&body),
            });
        }

        let envelope: SlackResponse = serde_json::from_str(&body)
            .map_err(|e| SlackError::Parse(format!("{e}: {}", sanitize_error_body(&body))))?;
        if !envelope.ok {
            return Err(SlackError::Api(
                envelope.error.unwrap_or_else(|| "unknown_error".to_owned()),
            ));
        }

        debug!(channel = %post.channel, "message posted to slack");
        Ok(())
    }
}

#[async_trait]
impl RemoteSink for SlackClient {
    async fn send(&self, post: &OutboundPost) -> Result<(), SlackError> {
        self.post_message(post).await
    }
}
