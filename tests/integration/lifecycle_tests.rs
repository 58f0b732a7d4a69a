//! Host lifecycle: Create / Control / Terminate and the handle bookkeeping
//! around them.

use crate::mock_hw::{ActuatorCall, LogSink, MockHardware, StaticConfig};

use rcc::app::commands::{HostEvent, HostEventTable, LifecycleAction};
use rcc::app::events::AppEvent;
use rcc::app::ports::{ConfigError, ConfigPort};
use rcc::app::service::{ControllerService, LifecycleState};
use rcc::app::tasks::TaskId;
use rcc::config::ControllerConfig;
use rcc::error::ReadError;

fn booted() -> (ControllerService, MockHardware, LogSink) {
    let mut svc = ControllerService::new(ControllerConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    svc.handle_host_event(HostEvent::Create, 0, &mut hw, &mut sink).unwrap();
    svc.handle_host_event(HostEvent::Control, 0, &mut hw, &mut sink).unwrap();
    (svc, hw, sink)
}

#[test]
fn create_then_control_registers_all_five_tasks() {
    let (svc, hw, sink) = booted();
    assert_eq!(svc.state(), LifecycleState::Active);
    assert_eq!(svc.live_tasks(), 5);
    for task in TaskId::ALL {
        assert!(svc.handle(task).is_some(), "{} has no handle", task.label());
    }
    assert_eq!(sink.events[0], AppEvent::Created);
    assert_eq!(sink.events[1], AppEvent::Started { tasks: 5 });
    assert!(hw.calls.is_empty(), "startup must not touch actuators");
}

#[test]
fn terminate_releases_every_handle_and_closes_actuators() {
    let (mut svc, mut hw, mut sink) = booted();
    svc.handle_host_event(HostEvent::Terminate, 10, &mut hw, &mut sink).unwrap();

    assert_eq!(svc.state(), LifecycleState::Idle);
    assert_eq!(svc.live_tasks(), 0);
    assert_eq!(svc.released_count(), 5);
    assert_eq!(hw.calls, vec![ActuatorCall::CloseMotor, ActuatorCall::CloseLed(18)]);
    assert_eq!(sink.events.last(), Some(&AppEvent::Stopped { released: 5 }));
}

#[test]
fn nothing_fires_after_terminate() {
    let (mut svc, mut hw, mut sink) = booted();
    assert_eq!(svc.dispatch(1_000, &mut hw, &mut sink), 3);
    svc.handle_host_event(HostEvent::Terminate, 1_500, &mut hw, &mut sink).unwrap();
    let reads = hw.reads;
    let calls = hw.calls.len();
    let ticks = svc.tick_count();

    for now in [2_000, 60_000, 10_000_000] {
        assert_eq!(svc.dispatch(now, &mut hw, &mut sink), 0, "fired at {now}");
    }
    assert_eq!(hw.reads, reads);
    assert_eq!(hw.calls.len(), calls);
    assert_eq!(svc.tick_count(), ticks);
    assert_eq!(svc.released_count(), 5);
}

#[test]
fn second_terminate_is_a_no_op() {
    let (mut svc, mut hw, mut sink) = booted();
    svc.handle_host_event(HostEvent::Terminate, 10, &mut hw, &mut sink).unwrap();
    let calls = hw.calls.len();
    let events = sink.events.len();

    svc.handle_host_event(HostEvent::Terminate, 20, &mut hw, &mut sink).unwrap();
    assert_eq!(hw.calls.len(), calls);
    assert_eq!(sink.events.len(), events);
    assert_eq!(svc.released_count(), 5);
}

#[test]
fn second_control_does_not_double_register() {
    let (mut svc, mut hw, mut sink) = booted();
    let before: Vec<_> = TaskId::ALL.iter().map(|t| svc.handle(*t)).collect();
    svc.handle_host_event(HostEvent::Control, 500, &mut hw, &mut sink).unwrap();
    let after: Vec<_> = TaskId::ALL.iter().map(|t| svc.handle(*t)).collect();
    assert_eq!(svc.live_tasks(), 5);
    assert_eq!(before, after);
}

#[test]
fn system_notices_change_nothing() {
    let (mut svc, mut hw, mut sink) = booted();
    for event in [
        HostEvent::LowBattery,
        HostEvent::LowMemory,
        HostEvent::LanguageChanged,
        HostEvent::RegionFormatChanged,
    ] {
        svc.handle_host_event(event, 100, &mut hw, &mut sink).unwrap();
        assert_eq!(sink.events.last(), Some(&AppEvent::HostNotice(event)));
    }
    assert_eq!(svc.state(), LifecycleState::Active);
    assert_eq!(svc.live_tasks(), 5);
    assert!(hw.calls.is_empty());
}

#[test]
fn custom_route_can_stop_on_low_battery() {
    let mut routes = HostEventTable::standard();
    routes.bind(HostEvent::LowBattery, LifecycleAction::Stop);
    let mut svc = ControllerService::with_routes(ControllerConfig::default(), routes);
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();

    svc.handle_host_event(HostEvent::Control, 0, &mut hw, &mut sink).unwrap();
    svc.handle_host_event(HostEvent::LowBattery, 5, &mut hw, &mut sink).unwrap();
    assert_eq!(svc.state(), LifecycleState::Idle);
    assert_eq!(svc.released_count(), 5);
}

#[test]
fn self_cancelled_task_is_not_released_again_on_terminate() {
    let (mut svc, mut hw, mut sink) = booted();
    hw.front_cm = Err(ReadError::EchoTimeout);

    svc.dispatch(1_000, &mut hw, &mut sink);
    assert_eq!(svc.handle(TaskId::FrontDistance), None);
    assert_eq!(svc.live_tasks(), 4);
    assert_eq!(svc.released_count(), 1);

    svc.handle_host_event(HostEvent::Terminate, 1_001, &mut hw, &mut sink).unwrap();
    assert_eq!(sink.events.last(), Some(&AppEvent::Stopped { released: 4 }));
    assert_eq!(svc.released_count(), 5, "each handle released exactly once");
}

#[test]
fn restart_after_terminate_gets_fresh_handles() {
    let (mut svc, mut hw, mut sink) = booted();
    let old = svc.handle(TaskId::Tilt).unwrap();
    svc.handle_host_event(HostEvent::Terminate, 10, &mut hw, &mut sink).unwrap();
    svc.handle_host_event(HostEvent::Control, 20, &mut hw, &mut sink).unwrap();
    let new = svc.handle(TaskId::Tilt).unwrap();
    assert_ne!(old, new);
    assert_eq!(svc.live_tasks(), 5);
}

#[test]
fn config_port_feeds_the_service() {
    let cfg = StaticConfig(r#"{ "distance_period_ms": 200, "led_pin": 5 }"#)
        .load()
        .unwrap();
    let mut svc = ControllerService::new(cfg);
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    svc.handle_host_event(HostEvent::Control, 0, &mut hw, &mut sink).unwrap();
    assert_eq!(svc.next_deadline_ms(), Some(200));

    svc.handle_host_event(HostEvent::Terminate, 1, &mut hw, &mut sink).unwrap();
    assert_eq!(hw.last_call(), Some(&ActuatorCall::CloseLed(5)));
}

#[test]
fn invalid_config_is_rejected_by_the_port() {
    let err = StaticConfig(r#"{ "tilt_period_ms": 0 }"#).load().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed(_)));
    assert_eq!(StaticConfig("[1, 2").load(), Err(ConfigError::Corrupted));
}
