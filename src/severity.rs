//! Log severity tags and the presentation table shared by both sinks.
//!
//! The set of severities is closed. Every severity maps to exactly one
//! [`SeverityStyle`] through [`LogSeverity::style`]; there is no other
//! branching on severity anywhere in the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity tag selecting formatting for the console and the remote sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    /// Informational message.
    Info,
    /// Something is starting (deploy, job, process).
    Start,
    /// Output from a scheduled job.
    Cron,
    /// Failure that needs attention.
    Error,
    /// Non-fatal problem.
    Warning,
    /// Something finished successfully.
    Success,
    /// Anything else: no prefix, no styling.
    #[default]
    #[serde(other)]
    Default,
}

/// Terminal style applied by the console sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStyle {
    /// Red foreground.
    Red,
    /// Yellow foreground.
    Yellow,
    /// Blue foreground.
    Blue,
    /// Green foreground.
    Green,
    /// Blue background (highlighted).
    OnBlue,
    /// Magenta foreground.
    Magenta,
    /// Printed as-is.
    Plain,
}

/// Which standard stream a console line goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Presentation rules for one severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    /// Prefix prepended to the remote text and quoted block. The error
    /// banner is not listed here because it embeds the configured mention.
    pub remote_prefix: Option<&'static str>,
    /// Glyph prepended to console text.
    pub console_glyph: Option<&'static str>,
    /// Literal tag the console sink puts in front of the text.
    pub console_tag: Option<&'static str>,
    /// Terminal style.
    pub style: ConsoleStyle,
    /// Target stream.
    pub stream: ConsoleStream,
}

const fn row(
    remote_prefix: Option<&'static str>,
    console_glyph: Option<&'static str>,
    console_tag: Option<&'static str>,
    style: ConsoleStyle,
    stream: ConsoleStream,
) -> SeverityStyle {
    SeverityStyle {
        remote_prefix,
        console_glyph,
        console_tag,
        style,
        stream,
    }
}

/// Severity → presentation lookup table.
const SEVERITY_TABLE: [(LogSeverity, SeverityStyle); 7] = [
    (
        LogSeverity::Info,
        row(
            Some(":information_source: "),
            Some("\u{2139}\u{fe0f} "),
            None,
            ConsoleStyle::Blue,
            ConsoleStream::Stdout,
        ),
    ),
    (
        LogSeverity::Start,
        row(
            Some(":rocket: "),
            Some("\u{1f680} "),
            None,
            ConsoleStyle::OnBlue,
            ConsoleStream::Stdout,
        ),
    ),
    (
        LogSeverity::Cron,
        row(
            Some(":alarm_clock: "),
            Some("\u{23f0} "),
            Some("[CRON]: "),
            ConsoleStyle::Magenta,
            ConsoleStream::Stdout,
        ),
    ),
    (
        LogSeverity::Error,
        row(None, None, None, ConsoleStyle::Red, ConsoleStream::Stderr),
    ),
    (
        LogSeverity::Warning,
        row(None, None, None, ConsoleStyle::Yellow, ConsoleStream::Stderr),
    ),
    (
        LogSeverity::Success,
        row(None, None, None, ConsoleStyle::Green, ConsoleStream::Stdout),
    ),
    (
        LogSeverity::Default,
        row(None, None, None, ConsoleStyle::Plain, ConsoleStream::Stdout),
    ),
];

const PLAIN: SeverityStyle = row(None, None, None, ConsoleStyle::Plain, ConsoleStream::Stdout);

impl LogSeverity {
    /// All severities, in table order.
    pub const ALL: [LogSeverity; 7] = [
        LogSeverity::Info,
        LogSeverity::Start,
        LogSeverity::Cron,
        LogSeverity::Error,
        LogSeverity::Warning,
        LogSeverity::Success,
        LogSeverity::Default,
    ];

    /// Look up the presentation rules for this severity.
    pub fn style(self) -> SeverityStyle {
        SEVERITY_TABLE
            .iter()
            .find(|(severity, _)| *severity == self)
            .map_or(PLAIN, |(_, style)| *style)
    }

    /// Lowercase name as used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Start => "start",
            Self::Cron => "cron",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogSeverity {
    type Err = std::convert::Infallible;

    /// Unknown names parse to [`LogSeverity::Default`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Ok(Self::ALL
            .into_iter()
            .find(|severity| severity.as_str() == normalized)
            .unwrap_or(Self::Default))
    }
}
