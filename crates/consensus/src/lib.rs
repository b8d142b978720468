//! Temporal consensus over repeated, partially wrong readings of a
//! fixed-format identifier.
//!
//! An external recognizer reads the same identifier once per frame and gets
//! it slightly wrong in a different way each time. The accumulator collects
//! those readings, votes per character slot, and reports a best guess plus
//! a per-slot confidence discounted by how few readings back it.

mod accumulator;
mod confidence;

pub use accumulator::{ConsensusAccumulator, ConsensusConfig, TAIL_SLOTS};

#[derive(Debug, thiserror::Error)]
pub enum ConsensusError {
    #[error("minimum candidate count must be at least 1")]
    InvalidMinimumCandidates,
    #[error("confidence floor must be within [0, 1), got {0}")]
    InvalidConfidenceFloor(f64),
}

pub type Result<T> = std::result::Result<T, ConsensusError>;
