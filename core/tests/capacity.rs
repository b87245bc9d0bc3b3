//! Required-capacity search tests: minimality, shrinkage gross-up,
//! input rejection, and the search ceiling.

use wfm_core::erlang::service_level;
use wfm_core::{CapacityPlanner, WfmError, WorkloadInterval};

fn planner() -> CapacityPlanner {
    CapacityPlanner::default()
}

/// The returned agent count meets the target and one fewer does not.
#[test]
fn required_agents_is_minimal() {
    let interval = WorkloadInterval::new(200.0, 300.0, 0.80);
    let result = planner().required_capacity(&interval, 0.0).unwrap();

    let at = service_level(200.0, 300.0, 20.0, result.required_agents).unwrap();
    let below = service_level(200.0, 300.0, 20.0, result.required_agents - 1).unwrap();

    assert!(at >= 0.80, "returned staffing misses target: {at}");
    assert!(
        below < 0.80,
        "one agent fewer also meets target, {} is not minimal ({below})",
        result.required_agents
    );
    assert_eq!(result.achieved_service_level, at);
}

/// grossAgents = ceil(required / (1 - shrinkage)).
#[test]
fn shrinkage_grosses_up_headcount() {
    // 150/h at 300s, 80/20, 20% shrinkage: the end-to-end scenario.
    let interval = WorkloadInterval::new(150.0, 300.0, 0.80);
    let result = planner().required_capacity(&interval, 0.20).unwrap();

    assert!(
        (15..=17).contains(&result.required_agents),
        "expected 15-17 agents, got {}",
        result.required_agents
    );
    let expected_gross = (f64::from(result.required_agents) / 0.8).ceil() as u32;
    assert_eq!(result.gross_agents, expected_gross);
}

/// The documented example: 18 required at 20% shrinkage is 23 paid heads.
#[test]
fn gross_up_example_18_at_20_percent() {
    // Pick a target that lands on exactly 18 required agents by probing
    // the evaluator first, then verify the gross-up arithmetic.
    let sl18 = service_level(160.0, 330.0, 20.0, 18).unwrap();
    let sl17 = service_level(160.0, 330.0, 20.0, 17).unwrap();
    // Choose a target between the two levels so the search stops at 18.
    let target = (sl17 + sl18) / 2.0;
    let interval = WorkloadInterval {
        volume: 160.0,
        aht_seconds: 330.0,
        target_service_level: target,
        target_answer_seconds: 20.0,
    };
    let result = planner().required_capacity(&interval, 0.20).unwrap();
    assert_eq!(result.required_agents, 18);
    assert_eq!(result.gross_agents, 23); // ceil(18 / 0.8) = ceil(22.5)
}

/// Zero volume needs zero agents, gross or net.
#[test]
fn zero_volume_needs_no_agents() {
    let interval = WorkloadInterval::new(0.0, 300.0, 0.80);
    let result = planner().required_capacity(&interval, 0.30).unwrap();
    assert_eq!(result.required_agents, 0);
    assert_eq!(result.gross_agents, 0);
    assert_eq!(result.achieved_service_level, 1.0);
}

/// Shrinkage of 1.0 would divide by zero; it must be rejected up front.
#[test]
fn full_shrinkage_is_rejected() {
    let interval = WorkloadInterval::new(100.0, 300.0, 0.80);
    let err = planner().required_capacity(&interval, 1.0).unwrap_err();
    assert!(
        matches!(err, WfmError::InvalidInput { field: "shrinkage", .. }),
        "expected InvalidInput for shrinkage, got {err}"
    );
}

/// Invalid interval fields are rejected, never coerced.
#[test]
fn invalid_intervals_are_rejected() {
    let bad_aht = WorkloadInterval::new(100.0, 0.0, 0.80);
    assert!(matches!(
        planner().required_capacity(&bad_aht, 0.0),
        Err(WfmError::InvalidInput { field: "aht_seconds", .. })
    ));

    let bad_target = WorkloadInterval::new(100.0, 300.0, 1.0);
    assert!(matches!(
        planner().required_capacity(&bad_target, 0.0),
        Err(WfmError::InvalidInput { field: "target_service_level", .. })
    ));

    let negative_volume = WorkloadInterval::new(-5.0, 300.0, 0.80);
    assert!(matches!(
        planner().required_capacity(&negative_volume, 0.0),
        Err(WfmError::InvalidInput { field: "volume", .. })
    ));
}

/// A ceiling too low to reach the target reports SearchExhausted with
/// the configured bound, instead of returning the ceiling as if valid.
#[test]
fn ceiling_exhaustion_is_an_error() {
    // 16.67 Erlangs cannot hit 80/20 with at most 18 agents.
    let tight = CapacityPlanner::new(18);
    let interval = WorkloadInterval::new(200.0, 300.0, 0.80);
    let err = tight.required_capacity(&interval, 0.0).unwrap_err();
    match err {
        WfmError::SearchExhausted { ceiling, .. } => assert_eq!(ceiling, 18),
        other => panic!("expected SearchExhausted, got {other}"),
    }
}

/// Identical requests return identical results.
#[test]
fn search_is_idempotent() {
    let interval = WorkloadInterval::new(200.0, 300.0, 0.80);
    let first = planner().required_capacity(&interval, 0.20).unwrap();
    let again = planner().required_capacity(&interval, 0.20).unwrap();
    assert_eq!(first.required_agents, again.required_agents);
    assert_eq!(first.gross_agents, again.gross_agents);
    assert_eq!(
        first.achieved_service_level.to_bits(),
        again.achieved_service_level.to_bits()
    );
}
