//! Session boundary: board lifecycle, error taxonomy and the final report.

use plantcare::app::controller::WateringController;
use plantcare::app::ports::PinMode;
use plantcare::app::session::run_session;
use plantcare::config::SystemConfig;
use plantcare::error::{BoardError, SessionError};
use plantcare::fsm::SessionPhase;
use plantcare::pins;
use plantcare::scheduler::{SessionOutcome, SessionScheduler, StopReason};

use crate::mock_hw::{
    BoardCall, FakeClock, MockBoard, MockChart, MockDisplay, config_with_budget, fixed_log,
};

const STAMP: &str = "2024-05-02 14:03:11   ";

fn controller(config: SystemConfig) -> WateringController {
    WateringController::with_log(config, fixed_log())
}

#[test]
fn report_carries_the_log_and_the_total() {
    let mut ctl = controller(SystemConfig::default());
    let mut board = MockBoard::new(&[700, 550, 300]).aborting_on(4);
    let mut display = MockDisplay::default();

    let report = run_session(
        &mut ctl,
        &mut board,
        &mut display,
        &mut MockChart::default(),
        &mut FakeClock::default(),
    )
    .unwrap();

    assert_eq!(report.phase, SessionPhase::Aborted);
    assert_eq!(report.total_watering_secs, 3);
    assert_eq!(
        report.log,
        format!(
            "{STAMP}Board started for the watering process.\n\
             {STAMP}Soil is dry, watering for 2 seconds\n\
             {STAMP}Soil is not adequately wet, watering for 1 second\n\
             {STAMP}Soil is now wet after 3 seconds of watering\n"
        )
    );
    assert_eq!(report.summary, format!("{STAMP}Total Watering Time was 3 Seconds\n"));

    // Log was reset; only the total line remains.
    assert_eq!(ctl.log().len(), 1);
    assert_eq!(display.clears, 1);
}

#[test]
fn three_tiers_run_to_the_deadline() {
    // Dry (5 s) + Moderate (4 s) + Wet (5 s) fill a 14 s budget exactly.
    let mut ctl = controller(config_with_budget(14));
    let mut board = MockBoard::new(&[700, 550, 300]);
    let mut clock = FakeClock::default();

    let report = run_session(
        &mut ctl,
        &mut board,
        &mut MockDisplay::default(),
        &mut MockChart::default(),
        &mut clock,
    )
    .unwrap();

    assert_eq!(report.phase, SessionPhase::Expired);
    assert_eq!(report.iterations, 3);
    assert_eq!(report.total_watering_secs, 3);
    assert_eq!(board.polls(), 3);
    assert_eq!(clock.now_ms, 14_000);
    assert_eq!(
        report.log,
        format!(
            "{STAMP}Board started for the watering process.\n\
             {STAMP}Soil is dry, watering for 2 seconds\n\
             {STAMP}Soil is not adequately wet, watering for 1 second\n\
             {STAMP}Soil is now wet after 3 seconds of watering\n"
        )
    );
    assert_eq!(report.summary, format!("{STAMP}Total Watering Time was 3 Seconds\n"));
    assert_eq!(board.calls.last(), Some(&BoardCall::Stop));
}

#[test]
fn board_is_configured_then_released() {
    let mut ctl = controller(SystemConfig::default());
    let mut board = MockBoard::new(&[300]).aborting_on(1);
    run_session(
        &mut ctl,
        &mut board,
        &mut MockDisplay::default(),
        &mut MockChart::default(),
        &mut FakeClock::default(),
    )
    .unwrap();

    assert_eq!(
        &board.calls[..5],
        &[
            BoardCall::Start,
            BoardCall::EnsureReady,
            BoardCall::PinMode(pins::MOISTURE_ADC_GPIO, PinMode::Analog),
            BoardCall::PinMode(pins::PUMP_RELAY_GPIO, PinMode::Output),
            BoardCall::PinMode(pins::ABORT_BUTTON_GPIO, PinMode::Input),
        ]
    );
    assert_eq!(board.calls.last(), Some(&BoardCall::Stop));
    assert_eq!(board.count(BoardCall::Stop), 1);
}

#[test]
fn connect_failure_skips_the_loop_and_still_stops() {
    let mut ctl = controller(SystemConfig::default());
    let mut board = MockBoard::new(&[700]);
    board.fail_start = Some(BoardError::InitFailed(-1));
    let mut display = MockDisplay::default();

    let failure = run_session(
        &mut ctl,
        &mut board,
        &mut display,
        &mut MockChart::default(),
        &mut FakeClock::default(),
    )
    .unwrap_err();

    assert_eq!(failure.error, SessionError::Connect(BoardError::InitFailed(-1)));
    assert_eq!(board.count(BoardCall::AbortPoll), 0);
    assert_eq!(board.count(BoardCall::Stop), 1);
    assert!(failure.log.is_empty());
    assert_eq!(failure.partial_log(), None);
    assert!(display.frames.is_empty());
    assert!(ctl.log().is_empty());
}

#[test]
fn handshake_failure_is_a_connect_error() {
    let mut ctl = controller(SystemConfig::default());
    let mut board = MockBoard::new(&[700]);
    board.fail_ready = Some(BoardError::NotReady);

    let failure = run_session(
        &mut ctl,
        &mut board,
        &mut MockDisplay::default(),
        &mut MockChart::default(),
        &mut FakeClock::default(),
    )
    .unwrap_err();

    assert!(matches!(failure.error, SessionError::Connect(BoardError::NotReady)));
    assert_eq!(board.count(BoardCall::Stop), 1);
}

#[test]
fn read_failure_with_pump_on_forces_it_off() {
    let mut ctl = controller(SystemConfig::default());
    // Moderate plan: read #1 classifies, read #2 fills the pump-on frame.
    let mut board = MockBoard::new(&[550]);
    board.fail_read_number = Some(2);

    let failure = run_session(
        &mut ctl,
        &mut board,
        &mut MockDisplay::default(),
        &mut MockChart::default(),
        &mut FakeClock::default(),
    )
    .unwrap_err();

    assert_eq!(
        failure.error,
        SessionError::Transport(BoardError::ReadFailed { pin: 4 })
    );
    assert_eq!(board.pump_calls(), vec![true, false]);
    assert!(!board.pump_on());
    assert_eq!(board.calls.last(), Some(&BoardCall::Stop));
    assert!(failure.log.contains("Board started for the watering process."));
    assert!(failure.log.contains("Soil is not adequately wet, watering for 1 second"));
    assert_eq!(failure.partial_log(), Some(failure.log.as_str()));
    assert!(ctl.log().is_empty());
}

#[test]
fn pump_off_failure_is_retried_once_then_surfaced() {
    let mut ctl = controller(SystemConfig::default());
    let mut board = MockBoard::new(&[700]);
    board.fail_pump_off = true;

    let failure = run_session(
        &mut ctl,
        &mut board,
        &mut MockDisplay::default(),
        &mut MockChart::default(),
        &mut FakeClock::default(),
    )
    .unwrap_err();

    assert_eq!(
        failure.error,
        SessionError::Transport(BoardError::WriteFailed { pin: 7 })
    );
    assert_eq!(board.pump_calls(), vec![true, false, false]);
    assert_eq!(board.count(BoardCall::Stop), 1);
}

#[test]
fn read_failure_between_plans_sends_no_pump_command() {
    let mut ctl = controller(SystemConfig::default());
    // Wet plan uses reads #1 and #2; iteration 2 fails on its first read.
    let mut board = MockBoard::new(&[300]);
    board.fail_read_number = Some(3);

    let failure = run_session(
        &mut ctl,
        &mut board,
        &mut MockDisplay::default(),
        &mut MockChart::default(),
        &mut FakeClock::default(),
    )
    .unwrap_err();

    assert!(matches!(failure.error, SessionError::Transport(_)));
    assert!(board.pump_calls().is_empty());
}

#[test]
fn each_session_starts_with_a_fresh_log() {
    let mut ctl = controller(config_with_budget(10));
    let mut board = MockBoard::new(&[300]);
    let mut clock = FakeClock::default();

    let first = run_session(
        &mut ctl,
        &mut board,
        &mut MockDisplay::default(),
        &mut MockChart::default(),
        &mut clock,
    )
    .unwrap();
    let second = run_session(
        &mut ctl,
        &mut board,
        &mut MockDisplay::default(),
        &mut MockChart::default(),
        &mut clock,
    )
    .unwrap();

    assert_eq!(first.phase, SessionPhase::Expired);
    assert_eq!(first.log, second.log);
    assert!(!second.log.contains("Total Watering Time"));
}

#[test]
fn scheduler_repeats_sessions_until_abort() {
    let mut ctl = controller(config_with_budget(10));
    // Session 1 spends two wet polls; the third poll, in session 2, aborts.
    let mut board = MockBoard::new(&[300]).aborting_on(3);
    let mut display = MockDisplay::default();
    let mut chart = MockChart::default();
    let mut clock = FakeClock::default();
    let mut retry_clock = FakeClock::default();
    let mut scheduler = SessionScheduler::new(ctl.config());

    let reason = scheduler.run(
        &mut |_: u32| match run_session(&mut ctl, &mut board, &mut display, &mut chart, &mut clock) {
            Ok(report) if report.phase == SessionPhase::Aborted => SessionOutcome::Aborted,
            Ok(_) => SessionOutcome::Expired,
            Err(_) => SessionOutcome::Failed,
        },
        &mut retry_clock,
    );

    assert_eq!(reason, StopReason::Aborted);
    assert_eq!(scheduler.sessions_run(), 2);
    assert_eq!(board.count(BoardCall::Start), 2);
    assert_eq!(board.count(BoardCall::Stop), 2);
}
