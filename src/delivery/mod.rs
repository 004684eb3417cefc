//! Ordered, rate-limited delivery of posts to a remote sink.
//!
//! A [`DeliveryQueue`] owns an unbounded FIFO and exactly one worker task.
//! The worker takes one post at a time, waits on its [`RateGate`], then
//! awaits the sink. Failed posts, including sends that panic, are reported
//! on the console and dropped; nothing is retried or re-enqueued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub mod gate;

pub use gate::{RateGate, DEFAULT_MIN_INTERVAL};

use crate::console::ConsoleSink;
use crate::severity::LogSeverity;
use crate::slack::{OutboundPost, RemoteSink};

/// Counters maintained by the queue and its worker.
#[derive(Debug, Default)]
struct QueueStats {
    enqueued: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of the queue counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueSnapshot {
    /// Posts accepted by [`DeliveryQueue::enqueue`].
    pub enqueued: u64,
    /// Posts the sink accepted.
    pub delivered: u64,
    /// Posts the sink rejected (dropped, not retried).
    pub failed: u64,
}

impl QueueSnapshot {
    /// Posts not yet attempted or currently in flight.
    pub fn pending(&self) -> u64 {
        self.enqueued
            .saturating_sub(self.delivered)
            .saturating_sub(self.failed)
    }
}

/// Single-worker FIFO in front of a [`RemoteSink`].
pub struct DeliveryQueue {
    tx: mpsc::UnboundedSender<OutboundPost>,
    worker: JoinHandle<()>,
    stats: Arc<QueueStats>,
    min_interval: Duration,
}

impl std::fmt::Debug for DeliveryQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryQueue")
            .field("min_interval", &self.min_interval)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl DeliveryQueue {
    /// Start a queue and its worker on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn new(sink: Arc<dyn RemoteSink>, min_interval: Duration) -> Self {
        Self::with_console(sink, min_interval, ConsoleSink::new())
    }

    /// Start a queue that reports failures through `console`.
    pub fn with_console(
        sink: Arc<dyn RemoteSink>,
        min_interval: Duration,
        console: ConsoleSink,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stats = Arc::new(QueueStats::default());
        let worker = tokio::spawn(run_worker(
            rx,
            RateGate::new(min_interval),
            sink,
            console,
            Arc::clone(&stats),
        ));
        Self {
            tx,
            worker,
            stats,
            min_interval,
        }
    }

    /// Append a post. Never blocks and never fails toward the caller.
    pub fn enqueue(&self, post: OutboundPost) {
        // Counted before sending so the worker never observes more
        // completions than enqueued posts.
        self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
        if let Err(mpsc::error::SendError(post)) = self.tx.send(post) {
            self.stats.enqueued.fetch_sub(1, Ordering::Relaxed);
            warn!(channel = %post.channel, "delivery worker stopped, dropping post");
        }
    }

    /// Minimum spacing between dispatch starts.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Current counters.
    pub fn stats(&self) -> QueueSnapshot {
        QueueSnapshot {
            enqueued: self.stats.enqueued.load(Ordering::Relaxed),
            delivered: self.stats.delivered.load(Ordering::Relaxed),
            failed: self.stats.failed.load(Ordering::Relaxed),
        }
    }

    /// Stop accepting posts and wait until every pending post was attempted.
    ///
    /// Returns the final counters.
    pub async fn flush(self) -> QueueSnapshot {
        let Self {
            tx, worker, stats, ..
        } = self;
        drop(tx);
        if let Err(e) = worker.await {
            warn!(error = %e, "delivery worker terminated abnormally");
        }
        QueueSnapshot {
            enqueued: stats.enqueued.load(Ordering::Relaxed),
            delivered: stats.delivered.load(Ordering::Relaxed),
            failed: stats.failed.load(Ordering::Relaxed),
        }
    }
}

/// The single consumer. Runs until every sender is dropped and the FIFO is empty.
async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<OutboundPost>,
    mut gate: RateGate,
    sink: Arc<dyn RemoteSink>,
    console: ConsoleSink,
    stats: Arc<QueueStats>,
) {
    while let Some(post) = rx.recv().await {
        gate.admit().await;
        let channel = post.channel.clone();
        match send_isolated(Arc::clone(&sink), post).await {
            Ok(()) => {
                stats.delivered.fetch_add(1, Ordering::Relaxed);
                debug!(channel = %channel, "post delivered");
            }
            Err(e) => {
                stats.failed.fetch_add(1, Ordering::Relaxed);
                console.emit(&format!("Failed to send message: {e}"), LogSeverity::Error);
                warn!(channel = %channel, error = %e, "post dropped after failed delivery");
            }
        }
    }
    debug!("delivery queue closed");
}

/// Run one send on its own task so a panicking sink counts as a failure
/// instead of killing the worker. Still awaited inline: one post in flight.
async fn send_isolated(sink: Arc<dyn RemoteSink>, post: OutboundPost) -> Result<(), String> {
    let attempt = tokio::spawn(async move { sink.send(&post).await });
    match attempt.await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(e) => Err(format!("remote sink aborted: {e}")),
    }
}
