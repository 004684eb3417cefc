//! Message formatting for both sinks.
//!
//! [`Formatter::format`] is a pure function of its inputs and the current
//! time; [`Formatter::format_at`] takes the time explicitly so callers can
//! freeze the clock.

use chrono::{DateTime, FixedOffset, Local};

use crate::severity::LogSeverity;
use crate::slack::{Block, OutboundPost, TextObject};

/// Mention tag placed in the error banner when none is configured.
pub const DEFAULT_MENTION: &str = "<@S0790GPRA48>";

/// Timestamp layout for the context block, e.g.
/// `Mon Oct 19 2026 09:33:00 GMT+0000`. A zone label follows in parentheses.
const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Zone label for a zero offset.
const UTC_ZONE_NAME: &str = "Coordinated Universal Time";

/// Render `at` as `Mon Oct 19 2026 09:33:00 GMT+0000 (Coordinated Universal Time)`.
///
/// chrono only knows offsets, so non-UTC zones are labelled `(GMT+02:00)`.
pub fn timestamp(at: &DateTime<FixedOffset>) -> String {
    let zone = if at.offset().local_minus_utc() == 0 {
        UTC_ZONE_NAME.to_owned()
    } else {
        at.format("GMT%:z").to_string()
    };
    format!("{} ({zone})", at.format(TIMESTAMP_FORMAT))
}

/// Marker put in front of every body line in the quoted section.
const QUOTE_MARKER: &str = "> ";

/// Output of one formatting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    /// Text for the console sink, before styling.
    pub console_text: String,
    /// Plain fallback text for the remote post.
    pub text: String,
    /// Presentation blocks: quoted body section, then timestamp context.
    pub blocks: Vec<Block>,
}

impl Formatted {
    /// Attach destination and credential, producing the post to enqueue.
    pub fn into_post(self, token: &str, channel: &str) -> OutboundPost {
        OutboundPost {
            token: token.to_owned(),
            channel: channel.to_owned(),
            text: self.text,
            blocks: self.blocks,
        }
    }
}

/// Builds console text and remote payloads from a body and a severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    mention: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_MENTION)
    }
}

impl Formatter {
    /// Create a formatter whose error banner pings `mention`.
    pub fn new(mention: impl Into<String>) -> Self {
        Self {
            mention: mention.into(),
        }
    }

    /// Mention tag used in the error banner.
    pub fn mention(&self) -> &str {
        &self.mention
    }

    /// Format `body` using the current local time.
    pub fn format(&self, body: &str, severity: LogSeverity) -> Formatted {
        self.format_at(body, severity, Local::now().fixed_offset())
    }

    /// Format `body` with an explicit timestamp.
    pub fn format_at(
        &self,
        body: &str,
        severity: LogSeverity,
        at: DateTime<FixedOffset>,
    ) -> Formatted {
        let prefix = self.remote_prefix(severity);
        let quoted = quote_lines(body);

        let blocks = vec![
            Block::Section {
                text: TextObject::mrkdwn(format!("{prefix}{quoted}")),
            },
            Block::Context {
                elements: vec![TextObject::mrkdwn(timestamp(&at))],
            },
        ];

        Formatted {
            console_text: console_text(body, severity),
            text: format!("{prefix}{body}"),
            blocks,
        }
    }

    /// Prefix for the remote text and quoted block.
    pub fn remote_prefix(&self, severity: LogSeverity) -> String {
        if severity == LogSeverity::Error {
            return format!(
                "\u{1f6a8} Yo {} deres an error \n\n [ERROR]: ",
                self.mention
            );
        }
        severity
            .style()
            .remote_prefix
            .map(str::to_owned)
            .unwrap_or_default()
    }
}

/// Prefix each line of `body` with `> ` and rejoin with newlines.
pub fn quote_lines(body: &str) -> String {
    body.split('\n')
        .map(|line| format!("{QUOTE_MARKER}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Console text for `body`: the severity glyph, if any, then the body.
pub fn console_text(body: &str, severity: LogSeverity) -> String {
    match severity.style().console_glyph {
        Some(glyph) => format!("{glyph}{body}"),
        None => body.to_owned(),
    }
}
