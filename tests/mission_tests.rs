//! Mission runner properties: gate enforcement, cleanup guarantee, and the
//! three end-to-end scenarios (full flight, low battery, lost command).
//!
//! Tests run with paused time so settle-delays auto-advance instantly.

mod common;

use common::{Recorder, Reply, ScriptedTransport};
use std::sync::Arc;
use tello_link::{
    CommandLink, FlightPlan, LinkConfig, MissionOutcome, MissionRunner, MissionStep,
};

async fn run_plan(
    plan: &FlightPlan,
    replies: Vec<Reply>,
    config: &LinkConfig,
) -> (MissionOutcome, Arc<Recorder>) {
    let (transport, recorder) = ScriptedTransport::new(replies);
    let link = CommandLink::new(transport, config);
    let outcome = MissionRunner::new(link).run(plan).await;
    (outcome, recorder)
}

#[tokio::test(start_paused = true)]
async fn scenario_full_flight_completes() {
    let plan = FlightPlan {
        steps: vec![
            MissionStep::command("command"),
            MissionStep::BatteryGate { min_percent: 20 },
            MissionStep::command("takeoff"),
            MissionStep::with_settle("forward 100", 3.0),
            MissionStep::command("land"),
        ],
    };
    let replies = vec![
        Reply::ok(),
        Reply::text("85"),
        Reply::ok(),
        Reply::ok(),
        Reply::ok(),
    ];
    let (outcome, recorder) = run_plan(&plan, replies, &LinkConfig::default()).await;

    assert_eq!(outcome, MissionOutcome::Completed);
    assert_eq!(
        recorder.sends(),
        vec!["command", "battery?", "takeoff", "forward 100", "land"]
    );
    assert_eq!(recorder.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn scenario_low_battery_aborts_before_takeoff() {
    let plan = FlightPlan::standard(20);
    let replies = vec![Reply::ok(), Reply::text("15")];
    let (outcome, recorder) = run_plan(&plan, replies, &LinkConfig::default()).await;

    assert_eq!(outcome, MissionOutcome::AbortedLowBattery);
    assert_eq!(recorder.sends(), vec!["command", "battery?"]);
    assert_eq!(recorder.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn scenario_lost_command_fails_without_landing() {
    // Everything up to takeoff is acknowledged; "forward 100" never is.
    let plan = FlightPlan::standard(20);
    let replies = vec![Reply::ok(), Reply::text("85"), Reply::ok()];
    let (outcome, recorder) = run_plan(&plan, replies, &LinkConfig::default()).await;

    assert!(matches!(outcome, MissionOutcome::Failed(_)));
    let sends = recorder.sends();
    // 3 sends of the lost command, then nothing further.
    assert_eq!(
        sends,
        vec![
            "command",
            "battery?",
            "takeoff",
            "forward 100",
            "forward 100",
            "forward 100"
        ]
    );
    assert!(!sends.contains(&"land".to_string()));
    assert_eq!(recorder.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn gate_blocks_low_and_unknown_readings() {
    // 19% and 0% are genuinely low; "???" parses to the -1 sentinel.
    for battery in ["19", "0", "???"] {
        let plan = FlightPlan::standard(20);
        let replies = vec![Reply::ok(), Reply::text(battery)];
        let (outcome, recorder) = run_plan(&plan, replies, &LinkConfig::default()).await;

        assert_eq!(
            outcome,
            MissionOutcome::AbortedLowBattery,
            "battery {battery:?} should abort"
        );
        assert!(!recorder.sends().contains(&"takeoff".to_string()));
        assert_eq!(recorder.close_count(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn gate_admits_threshold_and_above() {
    for battery in ["20", "85"] {
        let plan = FlightPlan::standard(20);
        let replies = vec![
            Reply::ok(),
            Reply::text(battery),
            Reply::ok(),
            Reply::ok(),
            Reply::ok(),
            Reply::ok(),
        ];
        let (outcome, recorder) = run_plan(&plan, replies, &LinkConfig::default()).await;

        assert_eq!(outcome, MissionOutcome::Completed, "battery {battery:?}");
        assert!(recorder.sends().contains(&"takeoff".to_string()));
    }
}

#[tokio::test(start_paused = true)]
async fn gate_timeout_counts_as_failed_gate() {
    // The battery query itself times out: the sentinel fails the gate
    // rather than surfacing an error.
    let plan = FlightPlan::standard(20);
    let replies = vec![Reply::ok()];
    let (outcome, recorder) = run_plan(&plan, replies, &LinkConfig::default()).await;

    assert_eq!(outcome, MissionOutcome::AbortedLowBattery);
    assert!(!recorder.sends().contains(&"takeoff".to_string()));
    assert_eq!(recorder.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn unrepresentable_settle_is_skipped() {
    // A plan file can carry any float; settle values Duration cannot
    // represent are ignored rather than aborting the run.
    let plan = FlightPlan::from_json(
        r#"{ "steps": [ { "command": { "command": "command", "settle_s": 1e30 } } ] }"#,
    )
    .unwrap();
    let (outcome, recorder) = run_plan(&plan, vec![Reply::ok()], &LinkConfig::default()).await;
    assert_eq!(outcome, MissionOutcome::Completed);
    assert_eq!(recorder.sends(), vec!["command"]);

    let plan = FlightPlan {
        steps: vec![MissionStep::with_settle("command", f32::INFINITY)],
    };
    let (outcome, recorder) = run_plan(&plan, vec![Reply::ok()], &LinkConfig::default()).await;
    assert_eq!(outcome, MissionOutcome::Completed);
    assert_eq!(recorder.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn mode_set_failure_closes_endpoint() {
    // The very first command goes unanswered; the endpoint must still be
    // released exactly once.
    let plan = FlightPlan::standard(20);
    let (outcome, recorder) = run_plan(&plan, Vec::new(), &LinkConfig::default()).await;

    assert!(matches!(outcome, MissionOutcome::Failed(_)));
    assert_eq!(recorder.sends(), vec!["command", "command", "command"]);
    assert_eq!(recorder.close_count(), 1);
}
