//! Historical aggregation tests: volume-weighted averages, fallback
//! behavior, and bad-row filtering.

use chrono::NaiveDate;
use wfm_core::{profile_by_market, HistoricalRow};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
}

fn row(d: u32, country: &str, channel: &str, volume: f64, aht: f64) -> HistoricalRow {
    HistoricalRow {
        date: date(d),
        country: country.into(),
        channel: channel.into(),
        volume,
        sla: 0.80,
        aht_seconds: aht,
        fte: 10.0,
    }
}

/// AHT is weighted by volume: a busy interval dominates a quiet one.
#[test]
fn aht_is_volume_weighted() {
    let rows = vec![
        row(1, "Spain", "Phone", 100.0, 200.0),
        row(2, "Spain", "Phone", 300.0, 400.0),
    ];
    let profiles = profile_by_market(&rows);
    let profile = &profiles[&("Spain".to_string(), "Phone".to_string())];

    // (200*100 + 400*300) / 400 = 350
    assert!((profile.weighted_aht_seconds - 350.0).abs() < 1e-9);
    assert!((profile.mean_volume - 200.0).abs() < 1e-9);
    assert_eq!(profile.row_count, 2);
    assert_eq!(profile.latest_date, date(2));
}

/// A market with zero total volume falls back to the plain mean
/// instead of dividing by zero.
#[test]
fn zero_volume_market_falls_back_to_plain_mean() {
    let rows = vec![
        row(1, "Poland", "Chat", 0.0, 200.0),
        row(2, "Poland", "Chat", 0.0, 400.0),
    ];
    let profiles = profile_by_market(&rows);
    let profile = &profiles[&("Poland".to_string(), "Chat".to_string())];
    assert!((profile.weighted_aht_seconds - 300.0).abs() < 1e-9);
    assert_eq!(profile.mean_volume, 0.0);
}

/// Markets are keyed by (country, channel); channels don't bleed into
/// each other.
#[test]
fn markets_are_separated_by_channel() {
    let rows = vec![
        row(1, "Spain", "Phone", 100.0, 300.0),
        row(1, "Spain", "Chat", 40.0, 600.0),
        row(1, "Mexico", "Phone", 80.0, 280.0),
    ];
    let profiles = profile_by_market(&rows);
    assert_eq!(profiles.len(), 3);
    let spain_chat = &profiles[&("Spain".to_string(), "Chat".to_string())];
    assert!((spain_chat.weighted_aht_seconds - 600.0).abs() < 1e-9);
}

/// Rows carrying NaN are reported and skipped, not folded into the
/// profile and not replaced with invented data.
#[test]
fn non_finite_rows_are_skipped() {
    let rows = vec![
        row(1, "Spain", "Phone", 100.0, 300.0),
        row(2, "Spain", "Phone", f64::NAN, 300.0),
        row(3, "Spain", "Phone", 100.0, f64::INFINITY),
    ];
    let profiles = profile_by_market(&rows);
    let profile = &profiles[&("Spain".to_string(), "Phone".to_string())];
    assert_eq!(profile.row_count, 1);
    assert!((profile.mean_volume - 100.0).abs() < 1e-9);
    // The skipped rows don't move the anchor date either.
    assert_eq!(profile.latest_date, date(1));
}

/// No rows, no profiles.
#[test]
fn empty_history_yields_no_profiles() {
    let profiles = profile_by_market(&[]);
    assert!(profiles.is_empty());
}
