//! Required-capacity search — minimal staffing for a service target.
//!
//! RULES:
//!   - Service level is monotonically non-decreasing in agent count for
//!     a fixed load, so a linear scan upward from the stability floor
//!     finds the minimum.
//!   - The search ceiling guarantees termination. Hitting it is
//!     reported as `SearchExhausted`, never returned as a staffing
//!     level.
//!   - Shrinkage grosses the net requirement up to paid headcount:
//!     `gross = ceil(required / (1 - shrinkage))`.

use crate::config::PlannerConfig;
use crate::erlang::{self, offered_load};
use crate::error::{WfmError, WfmResult};
use serde::{Deserialize, Serialize};

/// Default answer-time target, in seconds (the "20" of 80/20).
pub const DEFAULT_TARGET_ANSWER_SECONDS: f64 = 20.0;

/// One sizing request: a single interval's workload for one market.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorkloadInterval {
    /// Contacts offered per hour.
    pub volume: f64,
    /// Average handle time in seconds.
    pub aht_seconds: f64,
    /// Fraction of contacts to answer within the target time, in (0,1).
    pub target_service_level: f64,
    /// Answer-time target in seconds.
    pub target_answer_seconds: f64,
}

impl WorkloadInterval {
    /// Interval with the standard 20-second answer target.
    pub fn new(volume: f64, aht_seconds: f64, target_service_level: f64) -> Self {
        Self {
            volume,
            aht_seconds,
            target_service_level,
            target_answer_seconds: DEFAULT_TARGET_ANSWER_SECONDS,
        }
    }
}

/// Outcome of one capacity search. Immutable once returned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StaffingResult {
    /// Minimal concurrent agents meeting the target.
    pub required_agents: u32,
    /// Service level at `required_agents`.
    pub achieved_service_level: f64,
    /// Paid headcount after the shrinkage gross-up.
    pub gross_agents: u32,
}

/// The capacity planner. Holds only the search ceiling; each call is
/// independent and deterministic.
#[derive(Debug, Clone, Copy)]
pub struct CapacityPlanner {
    search_ceiling: u32,
}

impl Default for CapacityPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default().search_ceiling)
    }
}

impl CapacityPlanner {
    pub fn new(search_ceiling: u32) -> Self {
        Self { search_ceiling }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.search_ceiling)
    }

    /// Find the minimal integer agent count whose service level meets
    /// the interval's target, then gross it up for `shrinkage`.
    ///
    /// Zero volume needs zero agents and trivially meets any target.
    pub fn required_capacity(
        &self,
        interval: &WorkloadInterval,
        shrinkage: f64,
    ) -> WfmResult<StaffingResult> {
        validate_interval(interval)?;
        validate_shrinkage(shrinkage)?;

        if interval.volume == 0.0 {
            return Ok(StaffingResult {
                required_agents: 0,
                achieved_service_level: 1.0,
                gross_agents: 0,
            });
        }

        let intensity = offered_load(interval.volume, interval.aht_seconds);

        // Stability needs agents strictly above the offered load. If
        // even the ceiling can't clear it, the search has no stable
        // candidates at all.
        if intensity >= f64::from(self.search_ceiling) {
            return Err(self.exhausted(interval));
        }

        // Smallest integer strictly above the offered load. Anything at
        // or below it is unstable and evaluates to a 0.0 service level.
        let floor = intensity.floor() as u32 + 1;

        for agents in floor..=self.search_ceiling {
            let achieved = erlang::service_level(
                interval.volume,
                interval.aht_seconds,
                interval.target_answer_seconds,
                agents,
            )?;
            if achieved >= interval.target_service_level {
                let gross_agents = gross_up(agents, shrinkage);
                log::debug!(
                    "capacity: volume={} aht={}s -> required={agents} gross={gross_agents} sl={achieved:.4}",
                    interval.volume,
                    interval.aht_seconds
                );
                return Ok(StaffingResult {
                    required_agents: agents,
                    achieved_service_level: achieved,
                    gross_agents,
                });
            }
        }

        Err(self.exhausted(interval))
    }

    fn exhausted(&self, interval: &WorkloadInterval) -> WfmError {
        WfmError::SearchExhausted {
            ceiling: self.search_ceiling,
            volume: interval.volume,
            aht_seconds: interval.aht_seconds,
        }
    }
}

/// `ceil(required / (1 - shrinkage))`. Caller has already rejected
/// shrinkage outside [0, 1).
fn gross_up(required_agents: u32, shrinkage: f64) -> u32 {
    (required_agents as f64 / (1.0 - shrinkage)).ceil() as u32
}

fn validate_interval(interval: &WorkloadInterval) -> WfmResult<()> {
    if !interval.volume.is_finite() || interval.volume < 0.0 {
        return Err(WfmError::InvalidInput {
            field: "volume",
            value: interval.volume,
            reason: "must be finite and non-negative",
        });
    }
    if !interval.aht_seconds.is_finite() || interval.aht_seconds <= 0.0 {
        return Err(WfmError::InvalidInput {
            field: "aht_seconds",
            value: interval.aht_seconds,
            reason: "must be finite and positive",
        });
    }
    if !interval.target_service_level.is_finite()
        || interval.target_service_level <= 0.0
        || interval.target_service_level >= 1.0
    {
        return Err(WfmError::InvalidInput {
            field: "target_service_level",
            value: interval.target_service_level,
            reason: "must be strictly between 0 and 1",
        });
    }
    if !interval.target_answer_seconds.is_finite() || interval.target_answer_seconds < 0.0 {
        return Err(WfmError::InvalidInput {
            field: "target_answer_seconds",
            value: interval.target_answer_seconds,
            reason: "must be finite and non-negative",
        });
    }
    Ok(())
}

fn validate_shrinkage(shrinkage: f64) -> WfmResult<()> {
    if !shrinkage.is_finite() || shrinkage < 0.0 || shrinkage >= 1.0 {
        return Err(WfmError::InvalidInput {
            field: "shrinkage",
            value: shrinkage,
            reason: "must be in [0, 1); 1 would divide headcount by zero",
        });
    }
    Ok(())
}
