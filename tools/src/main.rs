//! wfm-runner: headless forecast runner for the staffing core.
//!
//! Usage:
//!   wfm-runner --history history.json [--config planner.json] [--horizon 365] [--json]
//!   wfm-runner --calc --volume 200 --aht 300 [--sl 0.80] [--shrinkage 0.20]
//!
//! The history file is a JSON array of rows:
//!   [{"date":"2026-01-01","country":"Spain","channel":"Phone",
//!     "volume":150.0,"sla":0.8,"aht_seconds":300.0,"fte":10.5}, ...]

use anyhow::Result;
use std::env;
use wfm_core::{
    forecast::peak_headcount_by_market, CapacityPlanner, ForecastDriver, HistoricalRow,
    PlannerConfig, WorkloadInterval,
};

const KNOWN_FLAGS: &[&str] = &[
    "--history",
    "--config",
    "--horizon",
    "--json",
    "--calc",
    "--volume",
    "--aht",
    "--sl",
    "--answer",
    "--shrinkage",
];

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    for flag in args.iter().skip(1).filter(|a| a.starts_with("--")) {
        if !KNOWN_FLAGS.contains(&flag.as_str()) {
            log::warn!("Unknown flag: {flag}");
        }
    }

    let mut config = match args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str())
    {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };

    if args.iter().any(|a| a == "--calc") {
        return run_calc(&args, &config);
    }

    let history_path = args
        .windows(2)
        .find(|w| w[0] == "--history")
        .map(|w| w[1].as_str())
        .ok_or_else(|| anyhow::anyhow!("--history <file.json> is required (or use --calc)"))?;

    config.horizon_days = parse_arg(&args, "--horizon", config.horizon_days);
    let emit_json = args.iter().any(|a| a == "--json");

    let content = std::fs::read_to_string(history_path)
        .map_err(|e| anyhow::anyhow!("Cannot read {history_path}: {e}"))?;
    let rows: Vec<HistoricalRow> = serde_json::from_str(&content)?;

    let driver = ForecastDriver::new(config.clone())?;
    let points = driver.forecast_horizon(&rows, None)?;

    if emit_json {
        // One JSON object per line; easy to stream into anything.
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        use std::io::Write;
        for p in &points {
            writeln!(lock, "{}", serde_json::to_string(p)?)?;
        }
        return Ok(());
    }

    print_summary(&rows, &points, &config);
    Ok(())
}

/// One-off interval sizing, the "Capacity Planner" screen in CLI form.
fn run_calc(args: &[String], config: &PlannerConfig) -> Result<()> {
    let volume = parse_arg(args, "--volume", 200.0_f64);
    let aht = parse_arg(args, "--aht", 300.0_f64);
    let sl = parse_arg(args, "--sl", config.target_service_level);
    let answer = parse_arg(args, "--answer", config.target_answer_seconds);
    let shrinkage = parse_arg(args, "--shrinkage", config.shrinkage);

    let planner = CapacityPlanner::from_config(config);
    let interval = WorkloadInterval {
        volume,
        aht_seconds: aht,
        target_service_level: sl,
        target_answer_seconds: answer,
    };
    let result = planner.required_capacity(&interval, shrinkage)?;

    println!("=== CAPACITY PLAN ===");
    println!("  volume:        {volume:.1}/h");
    println!("  aht:           {aht:.0}s");
    println!("  target:        {:.0}% in {answer:.0}s", sl * 100.0);
    println!("  shrinkage:     {:.0}%", shrinkage * 100.0);
    println!("  required:      {} agents", result.required_agents);
    println!("  achieved SL:   {:.1}%", result.achieved_service_level * 100.0);
    println!("  gross:         {} agents", result.gross_agents);
    Ok(())
}

fn print_summary(
    rows: &[HistoricalRow],
    points: &[wfm_core::ForecastPoint],
    config: &PlannerConfig,
) {
    let peaks = peak_headcount_by_market(points);
    let total_volume: f64 = points.iter().map(|p| p.projected_volume).sum();

    println!("=== FORECAST SUMMARY ===");
    println!("  history rows:    {}", rows.len());
    println!("  horizon:         {} days", config.horizon_days);
    println!("  markets:         {}", peaks.len());
    println!("  forecast points: {}", points.len());
    println!("  projected vol:   {total_volume:.0}");
    println!();
    println!("=== PEAK DAILY HEADCOUNT ===");
    if peaks.is_empty() {
        println!("  (no usable history)");
    } else {
        for ((country, channel), peak) in &peaks {
            println!("  {country} / {channel}: {peak}");
        }
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
