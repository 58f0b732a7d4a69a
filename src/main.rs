//! RCC rover controller: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   JsonFileConfig   SystemClock │
//! │  (Sensor+Actuator) (EventSink)    (ConfigPort)     (Clock)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          ControllerService (pure logic)                │    │
//! │  │  TimerDispatcher · tick runner · threshold evaluator   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  runtime::run (edge-executor loop, stop signal, deadline)      │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use log::{info, warn};

use rcc::adapters::config_file::JsonFileConfig;
use rcc::adapters::log_sink::LogEventSink;
use rcc::adapters::time::SystemClock;
use rcc::app::commands::HostEvent;
use rcc::app::ports::MonotonicClock;
use rcc::app::service::ControllerService;
use rcc::board;
use rcc::runtime::{self, StopReason, StopSignal};

/// Stop request for the event loop.  Any thread may signal it.
static STOP: StopSignal = StopSignal::new();

#[cfg(target_os = "espidf")]
fn init_logging() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn init_logging() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    init_logging()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  RCC rover controller v{}         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Load config (file or defaults) ─────────────────────
    let config = JsonFileConfig::from_env().load_or_default()?;

    // ── 3. Construct adapters ─────────────────────────────────
    let clock = SystemClock::new();
    let mut hw = board::build(&config)?;
    let mut sink = LogEventSink::new();

    // ── 4. Construct service and deliver startup events ──────
    let mut service = ControllerService::new(config);
    service.handle_host_event(HostEvent::Create, clock.now_ms(), &mut hw, &mut sink)?;
    service.handle_host_event(HostEvent::Control, clock.now_ms(), &mut hw, &mut sink)?;

    // ── 5. Event loop ─────────────────────────────────────────
    #[cfg(not(target_os = "espidf"))]
    runtime::stop_on_interrupt(&STOP)?;
    let reason = runtime::run(&mut service, &mut hw, &mut sink, &clock, &STOP);
    if reason == StopReason::AllTasksCancelled {
        warn!("Every sensor task cancelled itself; shutting down");
    }

    // ── 6. Teardown ───────────────────────────────────────────
    service.handle_host_event(HostEvent::Terminate, clock.now_ms(), &mut hw, &mut sink)?;
    info!(
        "Shutdown complete: {} ticks, {} timer releases",
        service.tick_count(),
        service.released_count()
    );
    Ok(())
}
