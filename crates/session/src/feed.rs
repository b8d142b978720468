//! Bounded reading feed from a capture worker into a session.
//!
//! Capture pipelines produce readings on a latency-sensitive thread that
//! must never block on the consensus lock. The feed buffers readings in a
//! bounded channel and drains them from its own worker thread; when the
//! buffer is full the newest reading is dropped and counted, never waited
//! on. Dropping is acceptable here because readings are redundant by
//! nature; the next frame supplies another one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::session::RecognitionSession;

/// Default number of readings the feed buffers before dropping.
pub const DEFAULT_FEED_CAPACITY: usize = 32;

/// Configuration for the reading feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Buffer capacity in readings.
    pub capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_FEED_CAPACITY,
        }
    }
}

/// Sender half of the feed, cloneable across capture threads.
#[derive(Clone)]
pub struct FeedSender {
    tx: Sender<String>,
    dropped: Arc<AtomicU64>,
}

impl FeedSender {
    /// Push one reading without blocking.
    ///
    /// Returns false when the reading was dropped because the buffer is
    /// full or the feed has shut down.
    pub fn push(&self, reading: impl Into<String>) -> bool {
        match self.tx.try_send(reading.into()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                // Rate-limit logging: only log every 10th drop to avoid spam
                if dropped % 10 == 1 {
                    tracing::warn!(dropped, "reading feed full, dropping readings");
                }
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("reading feed closed");
                false
            }
        }
    }

    /// Number of readings dropped because the buffer was full.
    pub fn dropped_readings(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Background worker draining buffered readings into a session.
///
/// Events (one `ConsensusUpdated` per accepted reading) flow through the
/// sink the session was constructed with.
pub struct ReadingFeed {
    sender: FeedSender,
    handle: JoinHandle<()>,
}

impl ReadingFeed {
    /// Spawn a feed with the default buffer capacity.
    pub fn spawn(session: RecognitionSession) -> Self {
        Self::with_config(FeedConfig::default(), session)
    }

    /// Spawn a feed with a custom buffer capacity.
    pub fn with_config(config: FeedConfig, session: RecognitionSession) -> Self {
        let (tx, rx) = bounded(config.capacity.max(1));
        let handle = std::thread::spawn(move || run_worker(rx, session));
        Self {
            sender: FeedSender {
                tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            handle,
        }
    }

    /// Get a clone of the sender.
    pub fn sender(&self) -> FeedSender {
        self.sender.clone()
    }

    /// Close the feed and wait for buffered readings to drain.
    ///
    /// Sender clones still held by capture threads keep the worker alive
    /// until they are dropped too.
    pub fn shutdown(self) {
        let ReadingFeed { sender, handle } = self;
        drop(sender);
        if handle.join().is_err() {
            tracing::warn!("reading feed worker panicked");
        }
    }
}

fn run_worker(rx: Receiver<String>, session: RecognitionSession) {
    tracing::debug!("reading feed worker started");
    for reading in rx {
        session.submit(&reading);
    }
    tracing::debug!("reading feed worker stopped");
}
