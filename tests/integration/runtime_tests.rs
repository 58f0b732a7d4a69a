//! The host event loop: each way it can end.

use std::time::Duration;

use crate::mock_hw::{ActuatorCall, LogSink, MockHardware};

use rcc::adapters::time::SystemClock;
use rcc::app::commands::HostEvent;
use rcc::app::ports::MonotonicClock;
use rcc::app::service::ControllerService;
use rcc::config::ControllerConfig;
use rcc::runtime::{self, StopReason, StopSignal};

fn fast_config() -> ControllerConfig {
    ControllerConfig {
        distance_period_ms: 10,
        temperature_period_ms: 20,
        illuminance_period_ms: 20,
        tilt_period_ms: 10,
        loop_poll_interval_ms: 2,
        ..ControllerConfig::default()
    }
}

fn started(cfg: ControllerConfig, hw: &mut MockHardware, sink: &mut LogSink, clock: &SystemClock) -> ControllerService {
    let mut svc = ControllerService::new(cfg);
    svc.handle_host_event(HostEvent::Control, clock.now_ms(), hw, sink).unwrap();
    svc
}

#[test]
fn stops_at_deadline() {
    let clock = SystemClock::new();
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    let cfg = ControllerConfig {
        run_for_secs: Some(1),
        ..fast_config()
    };
    let mut svc = started(cfg, &mut hw, &mut sink, &clock);
    let stop = StopSignal::new();

    let reason = runtime::run(&mut svc, &mut hw, &mut sink, &clock, &stop);
    assert_eq!(reason, StopReason::Deadline);
    assert!(clock.now_ms() >= 1_000);
    assert!(svc.tick_count() > 0);
    assert_eq!(svc.live_tasks(), 5, "run leaves the lifecycle to the caller");
}

#[test]
fn stops_when_every_task_cancelled_itself() {
    let clock = SystemClock::new();
    let mut hw = MockHardware::broken();
    let mut sink = LogSink::new();
    let mut svc = started(fast_config(), &mut hw, &mut sink, &clock);
    let stop = StopSignal::new();

    let reason = runtime::run(&mut svc, &mut hw, &mut sink, &clock, &stop);
    assert_eq!(reason, StopReason::AllTasksCancelled);
    assert_eq!(svc.released_count(), 5);
}

#[test]
fn stops_on_request_from_another_thread() {
    let clock = SystemClock::new();
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    let mut svc = started(fast_config(), &mut hw, &mut sink, &clock);
    let stop = StopSignal::new();

    let reason = std::thread::scope(|s| {
        s.spawn(|| {
            std::thread::sleep(Duration::from_millis(100));
            stop.signal(StopReason::Requested);
        });
        runtime::run(&mut svc, &mut hw, &mut sink, &clock, &stop)
    });
    assert_eq!(reason, StopReason::Requested);
    assert!(svc.tick_count() > 0);
}

#[test]
fn interrupted_run_still_closes_actuators_on_terminate() {
    // Same shape as the binary: a process-wide signal poked from a
    // detached thread, the way the Ctrl-C handler does it.
    static INTERRUPT: StopSignal = StopSignal::new();

    let clock = SystemClock::new();
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    let mut svc = started(fast_config(), &mut hw, &mut sink, &clock);

    let poker = std::thread::spawn(|| {
        std::thread::sleep(Duration::from_millis(50));
        INTERRUPT.signal(StopReason::Requested);
    });
    let reason = runtime::run(&mut svc, &mut hw, &mut sink, &clock, &INTERRUPT);
    poker.join().unwrap();
    assert_eq!(reason, StopReason::Requested);

    svc.handle_host_event(HostEvent::Terminate, clock.now_ms(), &mut hw, &mut sink).unwrap();
    assert_eq!(svc.live_tasks(), 0);
    let tail = &hw.calls[hw.calls.len() - 2..];
    assert_eq!(tail, &[ActuatorCall::CloseMotor, ActuatorCall::CloseLed(18)]);
}

#[test]
fn stale_stop_request_is_ignored() {
    let clock = SystemClock::new();
    let mut hw = MockHardware::broken();
    let mut sink = LogSink::new();
    let mut svc = started(fast_config(), &mut hw, &mut sink, &clock);
    let stop = StopSignal::new();
    stop.signal(StopReason::Requested);

    let reason = runtime::run(&mut svc, &mut hw, &mut sink, &clock, &stop);
    assert_eq!(reason, StopReason::AllTasksCancelled);
}
