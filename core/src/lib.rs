//! wfm-core: the staffing engine behind the workforce workspace.
//!
//! The library answers two questions and one batch form of them:
//!   1. Given a workload and an agent count, what service level does an
//!      M/M/c queue achieve? (`erlang`)
//!   2. Given a workload and a service target, how many agents are
//!      needed, net and after shrinkage? (`capacity`)
//!   3. Repeated per (country, channel) market over a 365-day horizon
//!      from historical aggregates. (`aggregate`, `forecast`)
//!
//! RULES:
//!   - The core holds no global state; every entry point is a plain
//!     function of its inputs.
//!   - Invalid inputs are rejected with `WfmError::InvalidInput`,
//!     never coerced or defaulted.
//!   - Numeric trouble is an error, never a silently degraded answer.
//!
//! The surrounding application (UI, import, persistence, auth) lives
//! elsewhere and talks to this crate through plain values.

pub mod aggregate;
pub mod capacity;
pub mod config;
pub mod erlang;
pub mod error;
pub mod forecast;
pub mod types;

pub use aggregate::{profile_by_market, HistoricalRow, MarketProfile};
pub use capacity::{
    CapacityPlanner, StaffingResult, WorkloadInterval, DEFAULT_TARGET_ANSWER_SECONDS,
};
pub use config::PlannerConfig;
pub use erlang::{offered_load, service_level};
pub use error::{WfmError, WfmResult};
pub use forecast::{peak_headcount_by_market, ForecastDriver, ForecastPoint};
