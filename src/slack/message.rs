//! Slack `chat.postMessage` payload types.

use serde::{Deserialize, Serialize};

/// Structured payload handed to a [`super::RemoteSink`].
///
/// Created once per `slack`/`full` call and consumed by exactly one
/// delivery attempt.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundPost {
    /// Bot token. Sent as a bearer credential, never in the JSON body.
    #[serde(skip)]
    pub token: String,
    /// Destination channel ID.
    pub channel: String,
    /// Plain-text fallback shown in notifications.
    pub text: String,
    /// Ordered presentation blocks.
    pub blocks: Vec<Block>,
}

impl std::fmt::Debug for OutboundPost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboundPost")
            .field("token", &"__REDACTED__")
            .field("channel", &self.channel)
            .field("text", &self.text)
            .field("blocks", &self.blocks)
            .finish()
    }
}

/// A Block Kit layout block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// A section holding one text object.
    Section {
        /// Section text.
        text: TextObject,
    },
    /// Small secondary text shown under the message.
    Context {
        /// Context elements.
        elements: Vec<TextObject>,
    },
}

impl Block {
    /// Text of a section block, if this is one.
    pub fn section_text(&self) -> Option<&str> {
        match self {
            Self::Section { text } => Some(&text.text),
            Self::Context { .. } => None,
        }
    }
}

/// Text object kind. Only `mrkdwn` is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextKind {
    /// Slack markdown.
    #[serde(rename = "mrkdwn")]
    Mrkdwn,
}

/// A Block Kit text object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextObject {
    /// Text kind.
    #[serde(rename = "type")]
    pub kind: TextKind,
    /// The text itself.
    pub text: String,
}

impl TextObject {
    /// Build a `mrkdwn` text object.
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
        }
    }
}
