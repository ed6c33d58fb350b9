//! Controller scenarios against mock adapters.
//!
//! Drives `WateringController::run` directly (no session boundary) and
//! checks tier decisions, hold sequences, accumulation and abort timing.

use core::time::Duration;

use plantcare::app::controller::{CHART_SERIES, WateringController};
use plantcare::config::SystemConfig;
use plantcare::fsm::{MoistureTier, SessionPhase};

use crate::mock_hw::{
    BoardCall, FakeClock, MockBoard, MockChart, MockDisplay, config_with_budget, fixed_log,
};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn controller(config: SystemConfig) -> WateringController {
    WateringController::with_log(config, fixed_log())
}

// ── Tier scenarios ────────────────────────────────────────────

#[test]
fn dry_moderate_wet_then_abort() {
    let mut ctl = controller(SystemConfig::default());
    let mut board = MockBoard::new(&[700, 550, 300]).aborting_on(4);
    let mut display = MockDisplay::default();
    let mut chart = MockChart::default();
    let mut clock = FakeClock::default();

    let state = ctl
        .run(&mut board, &mut display, &mut chart, &mut clock)
        .unwrap();

    assert_eq!(state.phase, SessionPhase::Aborted);
    assert_eq!(state.total_watering_secs, 3);
    assert_eq!(state.iterations, 3);
    assert_eq!(
        clock.waits,
        vec![secs(2), secs(3), secs(1), secs(1), secs(2), secs(5)]
    );
    assert_eq!(board.pump_calls(), vec![true, false, true, false]);

    let messages: Vec<&str> = ctl.log().entries().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Soil is dry, watering for 2 seconds",
            "Soil is not adequately wet, watering for 1 second",
            "Soil is now wet after 3 seconds of watering",
        ]
    );
}

#[test]
fn accumulation_over_mixed_tiers() {
    let mut ctl = controller(SystemConfig::default());
    let mut board = MockBoard::new(&[700, 550, 300, 700]).aborting_on(5);
    let mut clock = FakeClock::default();

    let state = ctl
        .run(
            &mut board,
            &mut MockDisplay::default(),
            &mut MockChart::default(),
            &mut clock,
        )
        .unwrap();

    assert_eq!(state.total_watering_secs, 5);
    let tiers: Vec<MoistureTier> = state.actuations.iter().map(|a| a.tier).collect();
    assert_eq!(
        tiers,
        vec![MoistureTier::Dry, MoistureTier::Moderate, MoistureTier::Dry]
    );
}

#[test]
fn threshold_boundaries_pick_the_right_tier() {
    for (reading, pump_calls) in [(650, 2), (649, 2), (500, 2), (499, 0)] {
        let mut ctl = controller(SystemConfig::default());
        let mut board = MockBoard::new(&[reading]).aborting_on(2);
        ctl.run(
            &mut board,
            &mut MockDisplay::default(),
            &mut MockChart::default(),
            &mut FakeClock::default(),
        )
        .unwrap();
        assert_eq!(board.pump_calls().len(), pump_calls, "reading {reading}");
    }
}

#[test]
fn pump_commands_strictly_alternate() {
    let mut ctl = controller(config_with_budget(120));
    let mut board = MockBoard::new(&[900, 600, 800, 520, 100, 700]);
    ctl.run(
        &mut board,
        &mut MockDisplay::default(),
        &mut MockChart::default(),
        &mut FakeClock::default(),
    )
    .unwrap();

    let calls = board.pump_calls();
    assert!(!calls.is_empty());
    for pair in calls.chunks(2) {
        assert_eq!(pair, [true, false]);
    }
    assert!(!board.pump_on());
}

// ── Abort ─────────────────────────────────────────────────────

#[test]
fn abort_on_first_iteration_waters_nothing() {
    let mut ctl = controller(SystemConfig::default());
    let mut board = MockBoard::new(&[800]).aborting_on(1);
    let mut display = MockDisplay::default();
    let mut chart = MockChart::default();

    let state = ctl
        .run(&mut board, &mut display, &mut chart, &mut FakeClock::default())
        .unwrap();

    assert_eq!(state.phase, SessionPhase::Aborted);
    assert!(state.abort_requested);
    assert_eq!(state.total_watering_secs, 0);
    assert_eq!(state.iterations, 0);
    assert_eq!(board.count(BoardCall::ReadMoisture), 0);
    assert!(board.pump_calls().is_empty());
    assert!(ctl.log().is_empty());
    assert!(chart.points.is_empty());

    let farewell = display.last().unwrap();
    assert_eq!(farewell.line(0), "Button Pressed");
    assert_eq!(farewell.line(1), "Exiting the System");
    assert_eq!(farewell.line(2), "Thank you");
}

#[test]
fn abort_takes_effect_at_the_next_iteration() {
    let mut ctl = controller(SystemConfig::default());
    // Pressed during iteration 2's holds, seen on poll 3.
    let mut board = MockBoard::new(&[700]).aborting_on(3);
    let state = ctl
        .run(
            &mut board,
            &mut MockDisplay::default(),
            &mut MockChart::default(),
            &mut FakeClock::default(),
        )
        .unwrap();

    assert_eq!(state.iterations, 2);
    assert_eq!(board.polls(), 3);
    assert_eq!(state.total_watering_secs, 4);
}

// ── Deadline ──────────────────────────────────────────────────

#[test]
fn wet_only_session_ends_within_one_recheck_of_the_deadline() {
    let mut ctl = controller(config_with_budget(60));
    let mut board = MockBoard::new(&[300]);
    let mut clock = FakeClock::default();

    let state = ctl
        .run(
            &mut board,
            &mut MockDisplay::default(),
            &mut MockChart::default(),
            &mut clock,
        )
        .unwrap();

    assert_eq!(state.phase, SessionPhase::Expired);
    assert!(clock.now_ms >= 60_000);
    assert!(clock.now_ms <= 65_000);
    assert_eq!(state.total_watering_secs, 0);
    assert!(board.pump_calls().is_empty());
    // The wet message repeats every iteration.
    assert_eq!(ctl.log().len(), state.iterations as usize);
}

#[test]
fn deadline_is_checked_before_the_abort_poll() {
    let mut ctl = controller(config_with_budget(10));
    let mut board = MockBoard::new(&[700]).aborting_on(3);
    let state = ctl
        .run(
            &mut board,
            &mut MockDisplay::default(),
            &mut MockChart::default(),
            &mut FakeClock::default(),
        )
        .unwrap();

    // Two dry iterations use up the 10 s budget; the third poll never happens.
    assert_eq!(state.phase, SessionPhase::Expired);
    assert_eq!(board.polls(), 2);
    assert_eq!(state.total_watering_secs, 4);
}

// ── Observational collaborators ───────────────────────────────

#[test]
fn every_classification_read_is_charted() {
    let mut ctl = controller(SystemConfig::default());
    let mut board = MockBoard::new(&[700, 550, 300]).aborting_on(4);
    let mut chart = MockChart::default();
    ctl.run(
        &mut board,
        &mut MockDisplay::default(),
        &mut chart,
        &mut FakeClock::default(),
    )
    .unwrap();

    let values: Vec<f32> = chart.points.iter().map(|(_, _, v)| *v).collect();
    assert_eq!(values, vec![700.0, 550.0, 300.0]);
    assert!(chart.points.iter().all(|(s, _, _)| s == CHART_SERIES));
    assert_eq!(chart.points[1].1, 5_000);
}

#[test]
fn broken_display_and_chart_do_not_change_decisions() {
    let mut ctl = controller(SystemConfig::default());
    let mut board = MockBoard::new(&[700, 550, 300]).aborting_on(4);
    let mut display = MockDisplay {
        broken: true,
        ..MockDisplay::default()
    };
    let mut chart = MockChart {
        broken: true,
        ..MockChart::default()
    };

    let state = ctl
        .run(&mut board, &mut display, &mut chart, &mut FakeClock::default())
        .unwrap();

    assert_eq!(state.total_watering_secs, 3);
    assert!(display.frames.is_empty());
}

#[test]
fn moderate_frames_show_the_current_reading() {
    let mut ctl = controller(SystemConfig::default());
    let mut board = MockBoard::new(&[550]).aborting_on(2);
    let mut display = MockDisplay::default();
    ctl.run(
        &mut board,
        &mut display,
        &mut MockChart::default(),
        &mut FakeClock::default(),
    )
    .unwrap();

    let lines = display.lines();
    assert_eq!(lines[0], "Not Adequately Wet");
    assert_eq!(lines[1], "Moisture: 550");
    assert_eq!(lines[2], "Pump is On");
    assert!(lines.iter().filter(|l| *l == "Moisture: 550").count() >= 3);
}
