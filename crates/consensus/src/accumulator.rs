//! Per-slot vote accumulation across repeated readings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::confidence::{corrected_confidence, sample_size_penalty};
use crate::{ConsensusError, Result};

/// Number of trailing character slots votes are collected for.
pub const TAIL_SLOTS: usize = 9;

/// Tuning for a consensus accumulator, fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusConfig {
    /// Readings required before any consensus is reported.
    pub min_candidates: usize,
    /// Corrected vote shares under this floor are reported as zero.
    pub confidence_floor: f64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            min_candidates: 2,
            confidence_floor: 0.4,
        }
    }
}

impl ConsensusConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_candidates < 1 {
            return Err(ConsensusError::InvalidMinimumCandidates);
        }
        if !(0.0..1.0).contains(&self.confidence_floor) {
            return Err(ConsensusError::InvalidConfidenceFloor(
                self.confidence_floor,
            ));
        }
        Ok(())
    }
}

/// Accumulates noisy readings of one identifier and votes, per character
/// slot, on the most likely value.
///
/// Slots are aligned from the end of each reading: slot 8 holds the last
/// character of every accepted candidate, slot 0 the 9th-from-last.
/// Trailing alignment matters because readings may arrive with variable
/// leading content while the identifier format fixes the tail.
///
/// One accumulator per recognition session; `reset` starts the next one.
#[derive(Debug)]
pub struct ConsensusAccumulator {
    config: ConsensusConfig,
    /// Accepted readings, in arrival order.
    candidates: Vec<String>,
    /// Per-slot vote history; each slot holds one char per accepted reading.
    slots: [Vec<char>; TAIL_SLOTS],
    /// Corrected confidence per slot, from the last computation.
    confidences: [f64; TAIL_SLOTS],
    /// Most recently computed best guess.
    consensus: String,
}

impl ConsensusAccumulator {
    pub fn new(config: ConsensusConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            candidates: Vec::new(),
            slots: Default::default(),
            confidences: [0.0; TAIL_SLOTS],
            consensus: String::new(),
        })
    }

    /// Feed one reading.
    ///
    /// Readings shorter than the slot window have no alignable tail and are
    /// filtered out (returns false, no state change). That is an expected
    /// per-frame outcome, not an error.
    pub fn accept(&mut self, candidate: &str) -> bool {
        let chars: Vec<char> = candidate.chars().collect();
        if chars.len() < TAIL_SLOTS {
            tracing::debug!(len = chars.len(), "reading rejected: too short");
            return false;
        }

        let tail = &chars[chars.len() - TAIL_SLOTS..];
        for (slot, ch) in self.slots.iter_mut().zip(tail) {
            slot.push(*ch);
        }
        self.candidates.push(candidate.to_string());
        true
    }

    /// Vote every non-empty slot, store the winning characters and their
    /// corrected confidences, and return the resulting best guess.
    ///
    /// Below the configured minimum the stored consensus is cleared and an
    /// empty string returned: too little evidence is "no answer yet", not
    /// an error. Confidence entries for slots that are empty during a
    /// computation keep their previous value.
    pub fn compute_consensus(&mut self) -> String {
        if self.candidates.len() < self.config.min_candidates {
            tracing::debug!(
                seen = self.candidates.len(),
                needed = self.config.min_candidates,
                "consensus withheld: not enough readings"
            );
            self.consensus.clear();
            return String::new();
        }

        let mut consensus = String::with_capacity(TAIL_SLOTS);
        for (idx, slot) in self.slots.iter().enumerate() {
            if let Some((winner, raw)) = slot_winner(slot) {
                let penalty = sample_size_penalty(slot.len());
                self.confidences[idx] =
                    corrected_confidence(penalty, raw, self.config.confidence_floor);
                consensus.push(winner);
            }
        }
        self.consensus = consensus;
        self.consensus.clone()
    }

    /// Drop all session state. The accumulator is reusable afterwards.
    pub fn reset(&mut self) {
        self.candidates.clear();
        for slot in &mut self.slots {
            slot.clear();
        }
        self.confidences = [0.0; TAIL_SLOTS];
        self.consensus.clear();
    }

    pub fn accepted_count(&self) -> usize {
        self.candidates.len()
    }

    /// Last accepted reading, or "" before the first one.
    pub fn most_recent_candidate(&self) -> &str {
        self.candidates.last().map(String::as_str).unwrap_or("")
    }

    /// Best guess from the last `compute_consensus` call ("" when none).
    pub fn consensus(&self) -> &str {
        &self.consensus
    }

    /// Per-slot corrected confidences from the last computation.
    pub fn confidences(&self) -> &[f64; TAIL_SLOTS] {
        &self.confidences
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }
}

/// Majority character of one slot and its raw vote share.
///
/// Counts are tallied first, then the slot is rescanned in arrival order
/// with a strict comparison: ties go to the first character to reach the
/// top count, and later characters with an equal count do not displace it.
fn slot_winner(slot: &[char]) -> Option<(char, f64)> {
    if slot.is_empty() {
        return None;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for ch in slot {
        *counts.entry(*ch).or_insert(0) += 1;
    }

    let mut best = 0usize;
    let mut winner = ' ';
    for ch in slot {
        let count = counts[ch];
        if count > best {
            best = count;
            winner = *ch;
        }
    }

    Some((winner, best as f64 / slot.len() as f64))
}
