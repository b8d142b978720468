//! Thread-safe recognition session.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use surecode_consensus::{ConsensusAccumulator, ConsensusConfig};
use surecode_normalize::Normalizer;

use crate::events::{NullSink, SessionEvent, UpdateSinkRef};
use crate::Result;

/// Session tuning, fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Accumulator tuning.
    pub consensus: ConsensusConfig,
    /// Rewrite confusable characters before readings are voted on.
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

fn default_normalize() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            consensus: ConsensusConfig::default(),
            normalize: true,
        }
    }
}

/// Point-in-time recognition result for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusSnapshot {
    /// Current best guess ("" until enough readings accumulate).
    pub identifier: String,
    /// Corrected confidence per character slot.
    pub confidences: Vec<f64>,
    /// Readings accepted so far this session.
    pub candidates_seen: usize,
    /// Most recently accepted reading ("" if none).
    pub last_reading: String,
    /// Timestamp in milliseconds since epoch.
    #[serde(default)]
    pub ts_ms: i64,
}

struct SessionState {
    accumulator: ConsensusAccumulator,
    normalizer: Option<Normalizer>,
}

/// Cloneable handle over one recognition session.
///
/// Every operation takes the session lock, runs to completion, and releases
/// it, so a consensus read can never observe a half-appended reading.
/// Events go out after the lock is released.
#[derive(Clone)]
pub struct RecognitionSession {
    state: Arc<Mutex<SessionState>>,
    sink: UpdateSinkRef,
}

impl RecognitionSession {
    /// Session that keeps its results to itself; hosts poll via `snapshot`.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_sink(config, Arc::new(NullSink))
    }

    /// Session that additionally publishes an event per accepted reading
    /// and per reset.
    pub fn with_sink(config: SessionConfig, sink: UpdateSinkRef) -> Result<Self> {
        let accumulator = ConsensusAccumulator::new(config.consensus)?;
        let normalizer = config.normalize.then(Normalizer::digits);
        Ok(Self {
            state: Arc::new(Mutex::new(SessionState {
                accumulator,
                normalizer,
            })),
            sink,
        })
    }

    /// Feed one raw reading. Returns whether it was accepted.
    ///
    /// Accepted readings trigger a `ConsensusUpdated` event carrying a
    /// fresh snapshot.
    pub fn submit(&self, reading: &str) -> bool {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            let cleaned = match &state.normalizer {
                Some(normalizer) => normalizer.normalize(reading),
                None => reading.to_string(),
            };
            if !state.accumulator.accept(&cleaned) {
                return false;
            }
            snapshot_locked(&mut state)
        };
        self.sink.publish(&SessionEvent::ConsensusUpdated(snapshot));
        true
    }

    /// Compute and return the current result.
    pub fn snapshot(&self) -> ConsensusSnapshot {
        let mut state = self.state.lock().unwrap();
        snapshot_locked(&mut state)
    }

    /// Clear the session, e.g. on a user gesture starting a new scan.
    pub fn reset(&self) {
        self.state.lock().unwrap().accumulator.reset();
        self.sink.publish(&SessionEvent::SessionReset);
    }

    pub fn candidates_seen(&self) -> usize {
        self.state.lock().unwrap().accumulator.accepted_count()
    }
}

fn snapshot_locked(state: &mut SessionState) -> ConsensusSnapshot {
    let identifier = state.accumulator.compute_consensus();
    ConsensusSnapshot {
        identifier,
        confidences: state.accumulator.confidences().to_vec(),
        candidates_seen: state.accumulator.accepted_count(),
        last_reading: state.accumulator.most_recent_candidate().to_string(),
        ts_ms: chrono::Utc::now().timestamp_millis(),
    }
}
