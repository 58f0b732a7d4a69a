//! End-to-end ticks through the real drivers on simulated peripherals.

use crate::mock_hw::LogSink;

use rcc::adapters::sim::{Script, SimulatedHardware};
use rcc::app::commands::HostEvent;
use rcc::app::events::AppEvent;
use rcc::app::ports::ActuatorPort;
use rcc::app::service::ControllerService;
use rcc::config::ControllerConfig;
use rcc::error::{ReadError, WriteError};

fn quiet() -> SimulatedHardware {
    SimulatedHardware {
        front_cm: Script::constant(150.0),
        back_cm: Script::constant(0.0),
        lux: Script::constant(300.0),
        ..SimulatedHardware::default()
    }
}

#[test]
fn back_approach_runs_then_stops_motor() {
    let cfg = ControllerConfig::default();
    let sim = SimulatedHardware {
        back_cm: Script::cycle(&[25.0, 40.0]),
        ..quiet()
    };
    let (mut hw, outputs) = sim.into_adapter(&cfg);
    let mut sink = LogSink::new();
    let mut svc = ControllerService::new(cfg);
    svc.handle_host_event(HostEvent::Control, 0, &mut hw, &mut sink).unwrap();

    svc.dispatch(1_000, &mut hw, &mut sink);
    assert!((outputs.motor_duty_ms() - 10.0).abs() < 0.01);
    assert!(hw.motor_open());

    svc.dispatch(2_000, &mut hw, &mut sink);
    assert_eq!(outputs.motor_duty_ms(), 0.0);
}

#[test]
fn darkness_lights_the_headlight() {
    let cfg = ControllerConfig::default();
    let sim = SimulatedHardware {
        lux: Script::constant(0.2),
        ..quiet()
    };
    let (mut hw, outputs) = sim.into_adapter(&cfg);
    let mut sink = LogSink::new();
    let mut svc = ControllerService::new(cfg);
    svc.handle_host_event(HostEvent::Control, 0, &mut hw, &mut sink).unwrap();

    svc.dispatch(60_000, &mut hw, &mut sink);
    assert!(outputs.led_on());
}

#[test]
fn terminate_closes_both_channels() {
    let cfg = ControllerConfig::default();
    let sim = SimulatedHardware {
        back_cm: Script::constant(12.0),
        lux: Script::constant(0.2),
        ..quiet()
    };
    let (mut hw, outputs) = sim.into_adapter(&cfg);
    let mut sink = LogSink::new();
    let mut svc = ControllerService::new(cfg);
    svc.handle_host_event(HostEvent::Control, 0, &mut hw, &mut sink).unwrap();
    svc.dispatch(60_000, &mut hw, &mut sink);
    assert!(outputs.led_on());
    assert!(outputs.motor_duty_ms() > 0.0);

    svc.handle_host_event(HostEvent::Terminate, 60_001, &mut hw, &mut sink).unwrap();
    assert!(!outputs.led_on());
    assert_eq!(outputs.motor_duty_ms(), 0.0);
    assert!(!hw.motor_open());
    assert!(!hw.led_open());
}

#[test]
fn intermittent_tilt_fault_cancels_tilt_task() {
    let cfg = ControllerConfig::default();
    let sim = SimulatedHardware {
        tilted: Script::new(vec![Ok(false), Err(ReadError::GpioFailed)]),
        ..quiet()
    };
    let (mut hw, _) = sim.into_adapter(&cfg);
    let mut sink = LogSink::new();
    let mut svc = ControllerService::new(cfg);
    svc.handle_host_event(HostEvent::Control, 0, &mut hw, &mut sink).unwrap();

    svc.dispatch(1_000, &mut hw, &mut sink);
    assert_eq!(svc.live_tasks(), 5);
    svc.dispatch(2_000, &mut hw, &mut sink);
    assert_eq!(svc.live_tasks(), 4);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::ReadFailed {
            error: ReadError::GpioFailed,
            ..
        }
    )));
}

#[test]
fn misconfigured_led_pin_fails_the_write() {
    let cfg = ControllerConfig::default();
    let (mut hw, outputs) = quiet().into_adapter(&cfg);
    assert_eq!(hw.set_led(cfg.led_pin + 1, true), Err(WriteError::UnknownPin(cfg.led_pin + 1)));
    assert!(!outputs.led_on());
}

#[test]
fn motor_duty_beyond_period_is_rejected() {
    let cfg = ControllerConfig::default();
    let (mut hw, outputs) = quiet().into_adapter(&cfg);
    assert_eq!(hw.set_motor_duty_cycle(25.0), Err(WriteError::DutyOutOfRange));
    assert_eq!(outputs.motor_duty_ms(), 0.0);
    assert!(!hw.motor_open());
}
