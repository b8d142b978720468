//! Session layer over the consensus accumulator.
//!
//! The accumulator itself is single-threaded by design; recognition hosts
//! deliver readings from a capture worker while the presentation layer reads
//! results from another thread. This crate owns that boundary: a cloneable
//! session handle serializing all access behind one lock, event publication
//! for hosts that want push updates, and a bounded feed for ingesting
//! readings without blocking the capture path.

mod events;
mod feed;
mod session;

pub use events::{InMemorySink, NullSink, SessionEvent, UpdateSink, UpdateSinkRef};
pub use feed::{FeedConfig, FeedSender, ReadingFeed, DEFAULT_FEED_CAPACITY};
pub use session::{ConsensusSnapshot, RecognitionSession, SessionConfig};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid consensus configuration: {0}")]
    InvalidConfig(#[from] surecode_consensus::ConsensusError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
