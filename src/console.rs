//! Synchronous, colorized console output.

use colored::{ColoredString, Colorize};

use crate::severity::{ConsoleStream, ConsoleStyle, LogSeverity};

/// A styled line ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    /// Destination stream.
    pub stream: ConsoleStream,
    /// Text including any ANSI escape codes.
    pub text: String,
}

/// Writes severity-styled text to stdout or stderr.
///
/// Write failures panic, as with `println!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Create a console sink.
    pub fn new() -> Self {
        Self
    }

    /// Style `text` for `severity` without writing it.
    pub fn render(&self, text: &str, severity: LogSeverity) -> ConsoleLine {
        let rules = severity.style();
        let tagged = match rules.console_tag {
            Some(tag) => format!("{tag}{text}"),
            None => text.to_owned(),
        };
        ConsoleLine {
            stream: rules.stream,
            text: apply_style(&tagged, rules.style),
        }
    }

    /// Style and write `text`.
    pub fn emit(&self, text: &str, severity: LogSeverity) {
        let line = self.render(text, severity);
        match line.stream {
            ConsoleStream::Stdout => println!("{}", line.text),
            ConsoleStream::Stderr => eprintln!("{}", line.text),
        }
    }
}

fn apply_style(text: &str, style: ConsoleStyle) -> String {
    let styled: ColoredString = match style {
        ConsoleStyle::Red => text.red(),
        ConsoleStyle::Yellow => text.yellow(),
        ConsoleStyle::Blue => text.blue(),
        ConsoleStyle::Green => text.green(),
        ConsoleStyle::OnBlue => text.on_blue(),
        ConsoleStyle::Magenta => text.magenta(),
        ConsoleStyle::Plain => return text.to_owned(),
    };
    styled.to_string()
}
