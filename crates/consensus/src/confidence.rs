//! Statistical confidence correction for per-slot vote results.
//!
//! A raw vote share overstates certainty when only a handful of readings
//! have been seen. A logistic sample-size penalty discounts it, and a floor
//! rescaling maps the usable range back onto [0, 1].

/// Penalties above this value are reported as full confidence.
const PENALTY_SATURATION: f64 = 0.96;

/// Logistic discount for the number of readings backing a vote.
///
/// Midpoint at 6 readings, scale 3: a single reading is trusted very
/// little, and from 16 readings on the penalty saturates to 1.0.
pub(crate) fn sample_size_penalty(observations: usize) -> f64 {
    if observations == 0 {
        return 0.0;
    }
    let penalty = 1.0 / (1.0 + ((6.0 - observations as f64) / 3.0).exp());
    if penalty < 0.0 {
        return 0.0;
    }
    if penalty > PENALTY_SATURATION {
        return 1.0;
    }
    penalty
}

/// Apply the sample-size penalty to a raw vote share and rescale the result
/// against the confidence floor.
///
/// Corrected scores under the floor carry no usable signal and collapse to
/// 0.0. The remaining range is stretched so the floor maps to 0.0 and a
/// perfect score stays at 1.0, which keeps reported values comparable
/// across floor settings.
pub(crate) fn corrected_confidence(penalty: f64, raw_probability: f64, floor: f64) -> f64 {
    let corrected = penalty * raw_probability;
    if corrected < floor {
        return 0.0;
    }
    (corrected - floor) / (1.0 - floor)
}
