//! Erlang-C evaluator — service level under the M/M/c queueing model.
//!
//! RULES:
//!   - Pure functions, no state, no I/O. Same inputs, same outputs.
//!   - The term sum uses the incremental recurrence
//!     `term_i = term_{i-1} * intensity / i`, never direct factorials.
//!     With a raw factorial the sum overflows f64 somewhere around
//!     170 agents and the original tool papered over that with a
//!     catch-all returning 1.0.
//!   - Invalid inputs are rejected, never coerced. A non-finite
//!     intermediate is a hard `NumericOverflow`, not a default answer.

use crate::error::{WfmError, WfmResult};

/// Running terms are renormalized past this magnitude. The wait
/// probability only depends on term ratios, so scaling the running
/// sum and term together leaves the result unchanged.
const RESCALE_LIMIT: f64 = 1e100;

/// Offered load in Erlangs: the average number of simultaneously
/// in-service contacts.
pub fn offered_load(volume: f64, aht_seconds: f64) -> f64 {
    volume * aht_seconds / 3600.0
}

/// Probability that a contact is answered within `target_answer_seconds`,
/// given `volume` contacts per hour handled by `agents` servers.
///
/// Degenerate cases, by definition:
///   - `volume == 0` → 1.0 (no traffic, trivially met)
///   - `agents <= intensity` → 0.0 (unstable system; the queue grows
///     without bound, so no target is ever met)
pub fn service_level(
    volume: f64,
    aht_seconds: f64,
    target_answer_seconds: f64,
    agents: u32,
) -> WfmResult<f64> {
    validate_inputs(volume, aht_seconds, target_answer_seconds, agents)?;

    if volume == 0.0 {
        return Ok(1.0);
    }

    let intensity = offered_load(volume, aht_seconds);
    let c = agents as f64;
    if c <= intensity {
        return Ok(0.0);
    }

    // sum = Σ_{i=0}^{agents-1} intensity^i / i!
    // term after the loop = intensity^agents / agents!
    // Both carry the same scale factor, so the ratio below is exact.
    let mut term = 1.0_f64;
    let mut sum = 0.0_f64;
    for i in 1..=agents {
        sum += term;
        term *= intensity / i as f64;
        if term > RESCALE_LIMIT {
            term /= RESCALE_LIMIT;
            sum /= RESCALE_LIMIT;
        }
    }

    let numerator = term * (c / (c - intensity));
    let prob_wait = numerator / (sum + numerator);

    let decay = (-(c - intensity) * target_answer_seconds / aht_seconds).exp();
    let level = 1.0 - prob_wait * decay;

    if !level.is_finite() {
        return Err(WfmError::NumericOverflow {
            context: "erlang-c wait probability",
        });
    }

    // Floating-point guard at the boundaries.
    Ok(level.clamp(0.0, 1.0))
}

fn validate_inputs(
    volume: f64,
    aht_seconds: f64,
    target_answer_seconds: f64,
    agents: u32,
) -> WfmResult<()> {
    if !volume.is_finite() || volume < 0.0 {
        return Err(WfmError::InvalidInput {
            field: "volume",
            value: volume,
            reason: "must be finite and non-negative",
        });
    }
    if !aht_seconds.is_finite() || aht_seconds <= 0.0 {
        return Err(WfmError::InvalidInput {
            field: "aht_seconds",
            value: aht_seconds,
            reason: "must be finite and positive",
        });
    }
    if !target_answer_seconds.is_finite() || target_answer_seconds < 0.0 {
        return Err(WfmError::InvalidInput {
            field: "target_answer_seconds",
            value: target_answer_seconds,
            reason: "must be finite and non-negative",
        });
    }
    if agents == 0 {
        return Err(WfmError::InvalidInput {
            field: "agents",
            value: 0.0,
            reason: "at least one agent is required",
        });
    }
    Ok(())
}
