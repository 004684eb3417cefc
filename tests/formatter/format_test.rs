//! Message formatting for console and Slack.

use chrono::{DateTime, FixedOffset};
use relaylog::formatter::{console_text, quote_lines, timestamp, Formatter, DEFAULT_MENTION};
use relaylog::slack::Block;
use relaylog::LogSeverity;

fn frozen_clock() -> DateTime<FixedOffset> {
    match DateTime::parse_from_rfc3339("2026-10-19T09:33:00+00:00") {
        Ok(at) => at,
        Err(err) => panic!("fixed timestamp should parse: {err}"),
    }
}

fn section_text(blocks: &[Block]) -> &str {
    match blocks.first().and_then(Block::section_text) {
        Some(text) => text,
        None => panic!("first block should be a section: {blocks:?}"),
    }
}

#[test]
fn format_is_deterministic_with_frozen_clock() {
    let formatter = Formatter::default();
    for severity in LogSeverity::ALL {
        let first = formatter.format_at("same body\nsecond line", severity, frozen_clock());
        let second = formatter.format_at("same body\nsecond line", severity, frozen_clock());
        assert_eq!(first, second, "severity {severity}");
    }
}

#[test]
fn lines_are_quoted_and_rejoined() {
    assert_eq!(quote_lines("a\nb\nc"), "> a\n> b\n> c");

    let formatted = Formatter::default().format_at("a\nb\nc", LogSeverity::Default, frozen_clock());
    assert_eq!(section_text(&formatted.blocks), "> a\n> b\n> c");
    assert_eq!(formatted.text, "a\nb\nc");
}

#[test]
fn empty_body_yields_single_empty_quote() {
    let formatted = Formatter::default().format_at("", LogSeverity::Info, frozen_clock());
    assert_eq!(section_text(&formatted.blocks), ":information_source: > ");
}

#[test]
fn error_banner_contains_mention_and_tag() {
    let formatted = Formatter::default().format_at("disk full", LogSeverity::Error, frozen_clock());

    assert!(formatted.text.contains("\u{1f6a8} Yo"));
    assert!(formatted.text.contains("deres an error"));
    assert!(formatted.text.contains(DEFAULT_MENTION));
    assert!(formatted.text.contains("[ERROR]: disk full"));
    assert!(section_text(&formatted.blocks).contains("[ERROR]: > disk full"));
}

#[test]
fn glyph_prefixes_apply_to_text_and_section() {
    let cases = [
        (LogSeverity::Info, ":information_source: "),
        (LogSeverity::Start, ":rocket: "),
        (LogSeverity::Cron, ":alarm_clock: "),
    ];
    let formatter = Formatter::default();
    for (severity, prefix) in cases {
        let formatted = formatter.format_at("job ran", severity, frozen_clock());
        assert_eq!(formatted.text, format!("{prefix}job ran"));
        assert_eq!(section_text(&formatted.blocks), format!("{prefix}> job ran"));
    }
}

#[test]
fn unlisted_severities_pass_text_through() {
    let formatter = Formatter::default();
    for severity in [
        LogSeverity::Warning,
        LogSeverity::Success,
        LogSeverity::Default,
    ] {
        let formatted = formatter.format_at("plain", severity, frozen_clock());
        assert_eq!(formatted.text, "plain");
        assert_eq!(formatted.console_text, "plain");
        assert_eq!(section_text(&formatted.blocks), "> plain");
    }

    let unknown: LogSeverity = match "verbose".parse() {
        Ok(severity) => severity,
        Err(never) => match never {},
    };
    assert_eq!(
        formatter.format_at("plain", unknown, frozen_clock()).text,
        "plain"
    );
}

#[test]
fn timestamp_context_block_is_always_second() {
    let formatter = Formatter::default();
    for severity in LogSeverity::ALL {
        let formatted = formatter.format_at("body", severity, frozen_clock());
        assert_eq!(formatted.blocks.len(), 2);
        match &formatted.blocks[1] {
            Block::Context { elements } => {
                assert_eq!(elements.len(), 1);
                assert_eq!(elements[0].text, "Mon Oct 19 2026 09:33:00 GMT+0000 (Coordinated Universal Time)");
            }
            other => panic!("second block should be context, got {other:?}"),
        }
    }
}

#[test]
fn offset_timestamp_is_labelled_with_its_offset() {
    let at = match DateTime::parse_from_rfc3339("2026-10-19T11:33:00+02:00") {
        Ok(at) => at,
        Err(e) => panic!("bad fixture: {e}"),
    };
    assert_eq!(timestamp(&at), "Mon Oct 19 2026 11:33:00 GMT+0200 (GMT+02:00)");

    let formatted = Formatter::default().format_at("body", LogSeverity::Info, at);
    match &formatted.blocks[1] {
        Block::Context { elements } => assert_eq!(elements[0].text, timestamp(&at)),
        other => panic!("second block should be context, got {other:?}"),
    }
}

#[test]
fn console_text_uses_unicode_glyphs() {
    assert_eq!(console_text("deploy finished", LogSeverity::Start), "\u{1f680} deploy finished");
    assert_eq!(console_text("tick", LogSeverity::Cron), "\u{23f0} tick");
    assert_eq!(console_text("disk full", LogSeverity::Error), "disk full");
}

#[test]
fn into_post_attaches_destination() {
    let post = Formatter::default()
        .format_at("hello", LogSeverity::Success, frozen_clock())
        .into_post("xoxb-test", "C0123");
    assert_eq!(post.token, "xoxb-test");
    assert_eq!(post.channel, "C0123");
    assert_eq!(post.text, "hello");
    assert_eq!(post.blocks.len(), 2);

    let json = match serde_json::to_value(&post) {
        Ok(json) => json,
        Err(err) => panic!("post should serialize: {err}"),
    };
    assert_eq!(json["channel"], "C0123");
    assert_eq!(json["blocks"][0]["type"], "section");
    assert_eq!(json["blocks"][0]["text"]["type"], "mrkdwn");
    assert_eq!(json["blocks"][1]["type"], "context");
    assert!(json.get("token").is_none());
}
