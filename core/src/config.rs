//! Planner configuration.
//!
//! Loaded from a single JSON file; every field has a default so an
//! empty object `{}` yields the documented baseline. Defaults mirror
//! the operating assumptions baked into the original planner screens:
//! 80/20 service target, 48 half-hour intervals per day, 16 productive
//! slots per 8-hour shift.

use crate::error::{WfmError, WfmResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    /// Fraction of contacts to answer within the target time, in (0,1).
    pub target_service_level: f64,
    /// Answer-time target in seconds (the "20" of 80/20).
    pub target_answer_seconds: f64,
    /// Fraction of paid time agents are off the queue, in [0,1).
    pub shrinkage: f64,
    /// Hard upper bound on the capacity search. Reaching it is an
    /// error, never an answer.
    pub search_ceiling: u32,
    /// Forecast horizon in days.
    pub horizon_days: u32,
    /// Half-hour intervals per operating day.
    pub intervals_per_day: u32,
    /// Productive half-hour slots in one shift; converts summed
    /// interval FTE into daily headcount.
    pub productive_slots_per_shift: u32,
    /// Linear drift applied to projected volume per day out.
    /// A placeholder projection, kept configurable so a real model can
    /// replace it without touching the staffing math.
    pub volume_drift_per_day: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            target_service_level: 0.80,
            target_answer_seconds: 20.0,
            shrinkage: 0.0,
            search_ceiling: 1000,
            horizon_days: 365,
            intervals_per_day: 48,
            productive_slots_per_shift: 16,
            volume_drift_per_day: 0.0001,
        }
    }
}

impl PlannerConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: PlannerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range fields up front so the batch driver never
    /// has to guess whether a failure is data or configuration.
    pub fn validate(&self) -> WfmResult<()> {
        if !self.target_service_level.is_finite()
            || self.target_service_level <= 0.0
            || self.target_service_level >= 1.0
        {
            return Err(WfmError::InvalidInput {
                field: "target_service_level",
                value: self.target_service_level,
                reason: "must be strictly between 0 and 1",
            });
        }
        if !self.target_answer_seconds.is_finite() || self.target_answer_seconds < 0.0 {
            return Err(WfmError::InvalidInput {
                field: "target_answer_seconds",
                value: self.target_answer_seconds,
                reason: "must be finite and non-negative",
            });
        }
        if !self.shrinkage.is_finite() || self.shrinkage < 0.0 || self.shrinkage >= 1.0 {
            return Err(WfmError::InvalidInput {
                field: "shrinkage",
                value: self.shrinkage,
                reason: "must be in [0, 1); 1 would divide headcount by zero",
            });
        }
        if self.search_ceiling == 0 {
            return Err(WfmError::InvalidInput {
                field: "search_ceiling",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if self.intervals_per_day == 0 {
            return Err(WfmError::InvalidInput {
                field: "intervals_per_day",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if self.productive_slots_per_shift == 0 {
            return Err(WfmError::InvalidInput {
                field: "productive_slots_per_shift",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if !self.volume_drift_per_day.is_finite() {
            return Err(WfmError::InvalidInput {
                field: "volume_drift_per_day",
                value: self.volume_drift_per_day,
                reason: "must be finite",
            });
        }
        Ok(())
    }
}
