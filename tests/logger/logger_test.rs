//! Entry points wired end to end against a recording sink.

use std::sync::Arc;
use std::time::Duration;

use relaylog::config::RelayConfig;
use relaylog::console::ConsoleSink;
use relaylog::delivery::DeliveryQueue;
use relaylog::formatter::Formatter;
use relaylog::{LogSeverity, Logger};

use crate::recording_sink::RecordingSink;

fn logger_with(sink: Arc<RecordingSink>) -> Logger {
    Logger::from_config(&RelayConfig::default(), sink)
}

#[tokio::test(start_paused = true)]
async fn full_emits_console_and_one_remote_post() {
    let sink = Arc::new(RecordingSink::new());
    let logger = logger_with(sink.clone());

    logger.full("deploy finished", "xoxb-test", "C0DEPLOY", LogSeverity::Start);
    let stats = logger.flush().await;

    let attempts = sink.attempts();
    assert_eq!(attempts.len(), 1);
    assert!(attempts[0].text.starts_with(":rocket:"));
    assert_eq!(attempts[0].block_count, 2);
    assert_eq!(attempts[0].channel, "C0DEPLOY");
    assert_eq!(stats.delivered, 1);
}

#[tokio::test(start_paused = true)]
async fn log_and_terminal_never_reach_the_queue() {
    let sink = Arc::new(RecordingSink::new());
    let logger = logger_with(sink.clone());

    logger.log("console only", LogSeverity::Info);
    logger.terminal("also console only", LogSeverity::Warning);
    let stats = logger.flush().await;

    assert!(sink.attempts().is_empty());
    assert_eq!(stats.enqueued, 0);
}

#[tokio::test(start_paused = true)]
async fn slack_and_full_share_one_ordered_queue() {
    let sink = Arc::new(RecordingSink::new());
    let logger = logger_with(sink.clone());

    logger.slack("xoxb-test", "C1", "one", LogSeverity::Info);
    logger.full("two", "xoxb-test", "C1", LogSeverity::Cron);
    logger.slack("xoxb-test", "C2", "three", LogSeverity::Default);
    logger.flush().await;

    assert_eq!(
        sink.texts(),
        vec![
            ":information_source: one".to_owned(),
            ":alarm_clock: two".to_owned(),
            "three".to_owned(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn remote_failure_does_not_reach_caller() {
    let sink = Arc::new(RecordingSink::new().failing_on(vec![0]));
    let logger = logger_with(sink.clone());

    logger.full("disk full", "xoxb-test", "C1", LogSeverity::Error);
    logger.full("recovered", "xoxb-test", "C1", LogSeverity::Success);
    let stats = logger.flush().await;

    assert_eq!(sink.attempts().len(), 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.delivered, 1);
    assert!(sink.texts()[0].contains("[ERROR]: disk full"));
}

#[tokio::test(start_paused = true)]
async fn configured_interval_and_mention_are_used() {
    let mut config = RelayConfig::default();
    config.queue.min_interval_ms = 250;
    config.slack.mention = "<!channel>".to_owned();

    let sink = Arc::new(RecordingSink::new());
    let logger = Logger::from_config(&config, sink.clone());
    logger.slack("xoxb-test", "C1", "a", LogSeverity::Error);
    logger.slack("xoxb-test", "C1", "b", LogSeverity::Error);
    logger.flush().await;

    let attempts = sink.attempts();
    assert_eq!(attempts.len(), 2);
    assert!(attempts[0].text.contains("<!channel>"));
    let gap = attempts[1].started.duration_since(attempts[0].started);
    assert!(gap >= Duration::from_millis(250));
    assert!(gap < Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn stats_reflect_pending_posts_before_flush() {
    let sink = Arc::new(RecordingSink::new());
    let logger = Logger::new(
        Formatter::default(),
        ConsoleSink::new(),
        DeliveryQueue::new(sink, Duration::from_millis(1000)),
    );

    logger.slack("xoxb-test", "C1", "queued", LogSeverity::Info);
    assert_eq!(logger.stats().pending(), 1);
    assert_eq!(logger.flush().await.pending(), 0);
}
