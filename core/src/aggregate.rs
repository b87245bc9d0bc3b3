//! Historical aggregation — collapses interval-level history into one
//! profile per (country, channel) market.
//!
//! Volume is averaged per row; AHT and SLA are volume-weighted so a
//! quiet interval cannot drag the handle time of a busy day around.
//! When a market has no volume at all, the weighted averages fall back
//! to plain means.

use crate::types::{Channel, Country};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One historical interval row, the `master_data` record shape:
/// (date, country, channel, volume, sla, aht, fte).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalRow {
    pub date: NaiveDate,
    pub country: Country,
    pub channel: Channel,
    pub volume: f64,
    pub sla: f64,
    pub aht_seconds: f64,
    pub fte: f64,
}

/// Aggregated history for one (country, channel) market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketProfile {
    pub mean_volume: f64,
    pub weighted_aht_seconds: f64,
    pub weighted_sla: f64,
    pub mean_fte: f64,
    pub row_count: usize,
    pub latest_date: NaiveDate,
}

#[derive(Debug, Default)]
struct Accumulator {
    volume_sum: f64,
    aht_sum: f64,
    sla_sum: f64,
    fte_sum: f64,
    weighted_aht_sum: f64,
    weighted_sla_sum: f64,
    count: usize,
    latest_date: Option<NaiveDate>,
}

/// Build one profile per market. Deterministic iteration order
/// (BTreeMap) keeps downstream forecasts reproducible.
///
/// Rows with non-finite volume or AHT are reported and skipped; the
/// profile is built from what remains.
pub fn profile_by_market(
    rows: &[HistoricalRow],
) -> BTreeMap<(Country, Channel), MarketProfile> {
    let mut acc: BTreeMap<(Country, Channel), Accumulator> = BTreeMap::new();

    for row in rows {
        if !row.volume.is_finite() || !row.aht_seconds.is_finite() {
            log::warn!(
                "aggregate: skipping row {} {}/{}: non-finite volume or aht",
                row.date,
                row.country,
                row.channel
            );
            continue;
        }
        let entry = acc
            .entry((row.country.clone(), row.channel.clone()))
            .or_default();
        entry.volume_sum += row.volume;
        entry.aht_sum += row.aht_seconds;
        entry.sla_sum += row.sla;
        entry.fte_sum += row.fte;
        entry.weighted_aht_sum += row.aht_seconds * row.volume;
        entry.weighted_sla_sum += row.sla * row.volume;
        entry.count += 1;
        entry.latest_date = Some(match entry.latest_date {
            Some(d) if d >= row.date => d,
            _ => row.date,
        });
    }

    acc.into_iter()
        .filter_map(|(key, a)| {
            let latest_date = a.latest_date?;
            let n = a.count as f64;
            // Volume-weighted averages; plain mean when the market saw
            // no volume at all.
            let (weighted_aht_seconds, weighted_sla) = if a.volume_sum > 0.0 {
                (
                    a.weighted_aht_sum / a.volume_sum,
                    a.weighted_sla_sum / a.volume_sum,
                )
            } else {
                (a.aht_sum / n, a.sla_sum / n)
            };
            Some((
                key,
                MarketProfile {
                    mean_volume: a.volume_sum / n,
                    weighted_aht_seconds,
                    weighted_sla,
                    mean_fte: a.fte_sum / n,
                    row_count: a.count,
                    latest_date,
                },
            ))
        })
        .collect()
}

/// Latest date across all finite rows — the anchor the forecast
/// horizon starts after.
pub fn latest_history_date(rows: &[HistoricalRow]) -> Option<NaiveDate> {
    rows.iter()
        .filter(|r| r.volume.is_finite() && r.aht_seconds.is_finite())
        .map(|r| r.date)
        .max()
}
