//! Batch forecast driver — staffing needs projected over a horizon.
//!
//! RULES:
//!   - One capacity search per (day, market). All intervals of a day
//!     carry the same volume slice, so the per-interval search result
//!     repeats `intervals_per_day` times; run it once and multiply.
//!   - A failing (day, market) combination is logged and skipped; the
//!     rest of the horizon still runs. Bad configuration aborts up
//!     front instead.
//!   - Volume projection is a linear drift off the historical mean.
//!     Placeholder, not a model; the staffing math is the contract.

use crate::aggregate::{self, HistoricalRow, MarketProfile};
use crate::capacity::{CapacityPlanner, WorkloadInterval};
use crate::config::PlannerConfig;
use crate::error::WfmResult;
use crate::types::{Channel, Country, DayIndex};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One projected day for one market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub country: Country,
    pub channel: Channel,
    pub projected_volume: f64,
    /// Sum of required agents across the day's intervals, in
    /// interval-FTE units.
    pub required_fte: f64,
    /// `ceil(required_fte / productive_slots_per_shift)` — bodies
    /// needed on an 8-hour shift pattern.
    pub daily_headcount: u32,
}

/// The horizon driver. Stateless between runs; everything it needs
/// arrives as parameters.
#[derive(Debug, Clone)]
pub struct ForecastDriver {
    config: PlannerConfig,
    planner: CapacityPlanner,
}

impl ForecastDriver {
    pub fn new(config: PlannerConfig) -> WfmResult<Self> {
        config.validate()?;
        let planner = CapacityPlanner::from_config(&config);
        Ok(Self { config, planner })
    }

    /// Project `config.horizon_days` days of staffing per market.
    ///
    /// The horizon anchors on the day after the latest historical date
    /// unless `start` overrides it. Empty history yields an empty
    /// forecast.
    pub fn forecast_horizon(
        &self,
        rows: &[HistoricalRow],
        start: Option<NaiveDate>,
    ) -> WfmResult<Vec<ForecastPoint>> {
        let profiles = aggregate::profile_by_market(rows);
        if profiles.is_empty() {
            log::info!("forecast: no usable history, nothing to project");
            return Ok(Vec::new());
        }

        // Anchor: caller override, else the day after the last row.
        // Profiles are built from the same finite-row filter, so a
        // non-empty map always has a latest date.
        let anchor = match start.or_else(|| {
            aggregate::latest_history_date(rows)
                .map(|latest| latest.checked_add_days(Days::new(1)).unwrap_or(latest))
        }) {
            Some(date) => date,
            None => return Ok(Vec::new()),
        };

        let mut points =
            Vec::with_capacity(profiles.len() * self.config.horizon_days as usize);
        let mut skipped: usize = 0;

        for day in 1..=self.config.horizon_days {
            let date = anchor
                .checked_add_days(Days::new(u64::from(day - 1)))
                .unwrap_or(anchor);
            for ((country, channel), profile) in &profiles {
                match self.project_day(day, profile) {
                    Ok((projected_volume, required_fte, daily_headcount)) => {
                        points.push(ForecastPoint {
                            date,
                            country: country.clone(),
                            channel: channel.clone(),
                            projected_volume,
                            required_fte,
                            daily_headcount,
                        });
                    }
                    Err(e) => {
                        skipped += 1;
                        log::warn!(
                            "forecast: day={day} market={country}/{channel} skipped: {e}"
                        );
                    }
                }
            }
        }

        log::info!(
            "forecast: {} markets x {} days -> {} points, {skipped} skipped",
            profiles.len(),
            self.config.horizon_days,
            points.len()
        );
        Ok(points)
    }

    /// Size one market for one day: drift the mean volume, slice it
    /// across the day's intervals, search once, scale back up.
    fn project_day(
        &self,
        day: DayIndex,
        profile: &MarketProfile,
    ) -> WfmResult<(f64, f64, u32)> {
        let projected_volume =
            profile.mean_volume * (1.0 + f64::from(day) * self.config.volume_drift_per_day);
        let intervals = f64::from(self.config.intervals_per_day);

        let interval = WorkloadInterval {
            volume: projected_volume / intervals,
            aht_seconds: profile.weighted_aht_seconds,
            target_service_level: self.config.target_service_level,
            target_answer_seconds: self.config.target_answer_seconds,
        };
        let staffing = self.planner.required_capacity(&interval, self.config.shrinkage)?;

        let required_fte = f64::from(staffing.required_agents) * intervals;
        let daily_headcount =
            (required_fte / f64::from(self.config.productive_slots_per_shift)).ceil() as u32;
        Ok((projected_volume, required_fte, daily_headcount))
    }
}

/// Peak daily headcount per market — the figure a planner reads first.
pub fn peak_headcount_by_market(
    points: &[ForecastPoint],
) -> BTreeMap<(Country, Channel), u32> {
    let mut peaks: BTreeMap<(Country, Channel), u32> = BTreeMap::new();
    for p in points {
        let entry = peaks
            .entry((p.country.clone(), p.channel.clone()))
            .or_insert(0);
        *entry = (*entry).max(p.daily_headcount);
    }
    peaks
}
