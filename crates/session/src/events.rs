//! Session event contract and the sink abstraction.
//!
//! Publishing goes through a trait so hosts can wire events into whatever
//! delivery mechanism they have (UI channel, IPC, log), and so the session
//! logic is testable without any of it.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::session::ConsensusSnapshot;

/// Event published by a recognition session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A reading was folded in and the consensus recomputed.
    ConsensusUpdated(ConsensusSnapshot),
    /// The session was cleared by the host.
    SessionReset,
}

/// Trait for delivering session events to subscribers.
pub trait UpdateSink: Send + Sync {
    fn publish(&self, event: &SessionEvent);
}

/// Type alias for a shared sink reference.
pub type UpdateSinkRef = Arc<dyn UpdateSink>;

/// In-memory sink for testing; captures every published event.
#[derive(Default)]
pub struct InMemorySink {
    events: Mutex<Vec<SessionEvent>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events, in publication order.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Only the consensus snapshots, in publication order.
    pub fn consensus_updates(&self) -> Vec<ConsensusSnapshot> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                SessionEvent::ConsensusUpdated(snapshot) => Some(snapshot.clone()),
                SessionEvent::SessionReset => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl UpdateSink for InMemorySink {
    fn publish(&self, event: &SessionEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Sink that discards every event, for hosts that only poll.
pub struct NullSink;

impl UpdateSink for NullSink {
    fn publish(&self, _event: &SessionEvent) {
        // Intentionally empty
    }
}
