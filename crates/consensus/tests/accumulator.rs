//! Integration tests for the consensus accumulator.
//!
//! Drives the accumulator the way the recognition pipeline does: a stream
//! of noisy readings, periodic consensus reads, and a session reset.

use surecode_consensus::{ConsensusAccumulator, ConsensusConfig, TAIL_SLOTS};

fn accumulator(min_candidates: usize, confidence_floor: f64) -> ConsensusAccumulator {
    ConsensusAccumulator::new(ConsensusConfig {
        min_candidates,
        confidence_floor,
    })
    .expect("valid config")
}

// =============================================================================
// Scanning Scenarios
// =============================================================================

mod scanning {
    use super::*;

    #[test]
    fn test_noisy_stream_converges_on_true_identifier() {
        let mut acc = accumulator(2, 0.4);

        // Mostly correct readings with scattered per-frame errors.
        let frames = [
            "402817365",
            "402817365",
            "4O2817365", // slot 1 misread
            "402817365",
            "402B17365", // slot 3 misread
            "402817365",
            "402817965", // slot 6 misread
            "402817365",
            "402817365",
            "402817365",
        ];
        for frame in frames {
            assert!(acc.accept(frame));
        }

        assert_eq!(acc.compute_consensus(), "402817365");
        assert_eq!(acc.accepted_count(), frames.len());
        assert_eq!(acc.most_recent_candidate(), "402817365");
    }

    #[test]
    fn test_short_frames_are_filtered_not_counted() {
        let mut acc = accumulator(2, 0.4);

        assert!(!acc.accept("4028173")); // partial read
        assert!(acc.accept("402817365"));
        assert!(!acc.accept("")); // recognizer produced nothing
        assert!(acc.accept("402817365"));

        assert_eq!(acc.accepted_count(), 2);
        assert_eq!(acc.compute_consensus(), "402817365");
    }

    #[test]
    fn test_variable_length_readings_align_on_tail() {
        let mut acc = accumulator(2, 0.0);

        // The recognizer sometimes picks up leading junk from the frame;
        // the fixed-format tail is what gets voted on.
        acc.accept("KZ402817365");
        acc.accept("402817365");
        acc.accept("#402817365");

        assert_eq!(acc.compute_consensus(), "402817365");
    }
}

// =============================================================================
// Confidence Reporting
// =============================================================================

mod confidence {
    use super::*;

    #[test]
    fn test_three_way_tie_under_floor() {
        let mut acc = accumulator(3, 0.4);

        assert!(acc.accept("000000001"));
        assert!(acc.accept("000000002"));
        assert!(acc.accept("000000003"));

        let consensus = acc.compute_consensus();
        assert_eq!(consensus.chars().count(), TAIL_SLOTS);
        assert!(consensus.starts_with("00000000"));
        // First-to-max tie-break: the winner is whichever of 1/2/3 came
        // first, and a three-way split under the floor reports no signal.
        assert!(matches!(consensus.chars().last(), Some('1' | '2' | '3')));
        assert_eq!(acc.confidences()[8], 0.0);
    }

    #[test]
    fn test_long_unanimous_run_reaches_full_confidence() {
        let mut acc = accumulator(2, 0.4);
        for _ in 0..20 {
            acc.accept("402817365");
        }
        acc.compute_consensus();
        for c in acc.confidences() {
            assert_eq!(*c, 1.0);
        }
    }

    #[test]
    fn test_disputed_slot_scores_below_unanimous_slots() {
        let mut acc = accumulator(2, 0.0);
        for i in 0..20 {
            // Last slot flips between 5 and 6 on alternating frames.
            if i % 2 == 0 {
                acc.accept("402817365");
            } else {
                acc.accept("402817366");
            }
        }
        acc.compute_consensus();

        let confidences = acc.confidences();
        for c in &confidences[..8] {
            assert_eq!(*c, 1.0);
        }
        assert!(confidences[8] < confidences[0]);
        assert!(confidences[8] > 0.0);
    }
}

// =============================================================================
// Session Lifecycle
// =============================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn test_reset_makes_accumulator_reusable() {
        let mut acc = accumulator(2, 0.4);

        acc.accept("402817365");
        acc.accept("402817365");
        assert_eq!(acc.compute_consensus(), "402817365");

        acc.reset();
        assert_eq!(acc.accepted_count(), 0);
        assert_eq!(acc.most_recent_candidate(), "");
        assert_eq!(acc.compute_consensus(), "");

        // A fresh identifier in the same session object.
        acc.accept("911911911");
        acc.accept("911911911");
        assert_eq!(acc.compute_consensus(), "911911911");
    }

    #[test]
    fn test_consensus_sticky_between_computations() {
        let mut acc = accumulator(2, 0.4);
        acc.accept("402817365");
        acc.accept("402817365");
        acc.compute_consensus();

        // The stored consensus is a snapshot, stale until recomputed.
        acc.accept("999999999");
        assert_eq!(acc.consensus(), "402817365");
    }
}
