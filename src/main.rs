//! PlantCare Firmware: Main Entry Point
//!
//! Hexagonal architecture with a blocking, session-scoped control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Esp32Board            LogDisplay     MoistureChart  SystemClock│
//! │  (Board+Sensor+        (StatusSink)   (ChartSink)    (Clock)   │
//! │   Actuator+Abort)                                              │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │        WateringController (pure logic)                 │    │
//! │  │  classify · tier plans · EventLog                      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  SessionScheduler (runs_per_day sessions, stops on abort)      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{error, info};

use esp_idf_svc::hal::delay::FreeRtos;

use plantcare::adapters::chart::MoistureChart;
use plantcare::adapters::display::LogDisplay;
use plantcare::adapters::hardware::Esp32Board;
use plantcare::adapters::time::SystemClock;
use plantcare::app::controller::{CHART_SERIES, SessionReport, WateringController};
use plantcare::app::session::run_session;
use plantcare::config::SystemConfig;
use plantcare::fsm::SessionPhase;
use plantcare::scheduler::{SessionOutcome, SessionScheduler};

/// Optional JSON override baked in at build time.
const CONFIG_OVERRIDE: Option<&str> = option_env!("PLANTCARE_CONFIG_JSON");

const LOG_BANNER: &str = "********* Watering Process Log: *********";

fn load_config() -> Result<SystemConfig> {
    let config = match CONFIG_OVERRIDE {
        Some(json) => {
            info!("Config: applying build-time override");
            SystemConfig::from_json(json).map_err(|e| anyhow::anyhow!("{}", e))?
        }
        None => SystemConfig::default(),
    };
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("invalid watering config")?;
    Ok(config)
}

fn print_report(log: &str, summary: &str) {
    println!("{}", LOG_BANNER);
    print!("{}", log);
    print!("{}", summary);
}

fn main() -> Result<()> {
    // ── 1. Platform init ──────────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PlantCare v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config ─────────────────────────────────────────────
    let config = load_config()?;
    info!(
        "Thresholds dry>={} moderate>={}, {} sessions/day of {}s",
        config.dry_threshold,
        config.moderate_threshold,
        config.runs_per_day,
        config.session_interval().as_secs()
    );

    // ── 3. Adapters ───────────────────────────────────────────
    let mut board = Esp32Board::new(&config, FreeRtos);
    let mut display = LogDisplay::new(FreeRtos, config.display_settle());
    let mut chart = MoistureChart::new("Moisture Level", "Time", "Moisture");
    let (x_label, y_label) = chart.axes();
    info!("Chart '{}': {} vs {}", chart.title(), y_label, x_label);
    let mut clock = SystemClock::new();
    let mut retry_clock = SystemClock::new();

    let mut controller = WateringController::new(config.clone());
    let mut scheduler = SessionScheduler::new(&config);

    // ── 4. Session loop ───────────────────────────────────────
    let reason = scheduler.run(
        &mut |index: u32| {
            match run_session(&mut controller, &mut board, &mut display, &mut chart, &mut clock) {
                Ok(SessionReport {
                    phase, log, summary, ..
                }) => {
                    print_report(&log, &summary);
                    info!(
                        "Session {} done, {} chart points",
                        index + 1,
                        chart.data_window(CHART_SERIES).len()
                    );
                    if phase == SessionPhase::Aborted {
                        SessionOutcome::Aborted
                    } else {
                        SessionOutcome::Expired
                    }
                }
                Err(failure) => {
                    error!("{}", failure);
                    if let Some(log) = failure.partial_log() {
                        print_report(log, "");
                    }
                    SessionOutcome::Failed
                }
            }
        },
        &mut retry_clock,
    );

    info!("Watering schedule stopped: {:?}", reason);
    Ok(())
}
