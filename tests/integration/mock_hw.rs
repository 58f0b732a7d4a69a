//! Mock adapters for integration tests.
//!
//! [`MockHardware`] serves fixed sensor results and records every actuator
//! call so tests can assert on the full command history without touching
//! real GPIO/PWM.

use rcc::app::events::AppEvent;
use rcc::app::ports::{
    ActuatorPort, ConfigError, ConfigPort, EventSink, Placement, SensorPort, TemperatureSample,
};
use rcc::config::ControllerConfig;
use rcc::error::{ReadError, WriteError};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Motor(f32),
    Led { pin: u8, on: bool },
    CloseMotor,
    CloseLed(u8),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub front_cm: Result<f32, ReadError>,
    /// 0 reads as "no echo" and leaves the motor alone.
    pub back_cm: Result<f32, ReadError>,
    pub temperature: Result<TemperatureSample, ReadError>,
    pub lux: Result<f32, ReadError>,
    pub tilted: Result<bool, ReadError>,
    pub motor_error: Option<WriteError>,
    pub calls: Vec<ActuatorCall>,
    pub reads: u32,
}

#[allow(dead_code)]
impl MockHardware {
    /// Readings that trigger no action anywhere.
    pub fn new() -> Self {
        Self {
            front_cm: Ok(150.0),
            back_cm: Ok(0.0),
            temperature: Ok(TemperatureSample {
                object_c: 22.0,
                ambient_c: 21.0,
            }),
            lux: Ok(250.0),
            tilted: Ok(false),
            motor_error: None,
            calls: Vec::new(),
            reads: 0,
        }
    }

    /// Every sensor read fails.
    pub fn broken() -> Self {
        Self {
            front_cm: Err(ReadError::EchoTimeout),
            back_cm: Err(ReadError::EchoTimeout),
            temperature: Err(ReadError::BusFailed),
            lux: Err(ReadError::BusFailed),
            tilted: Err(ReadError::GpioFailed),
            ..Self::new()
        }
    }

    pub fn last_call(&self) -> Option<&ActuatorCall> {
        self.calls.last()
    }

    pub fn motor_writes(&self) -> Vec<f32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Motor(duty) => Some(*duty),
                _ => None,
            })
            .collect()
    }

    pub fn led_on(&self, pin: u8) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Led { pin: p, on } if *p == pin => Some(*on),
                ActuatorCall::CloseLed(p) if *p == pin => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_distance(&mut self, placement: Placement) -> Result<f32, ReadError> {
        self.reads += 1;
        match placement {
            Placement::Front => self.front_cm,
            Placement::Back => self.back_cm,
        }
    }

    fn read_temperature(&mut self) -> Result<TemperatureSample, ReadError> {
        self.reads += 1;
        self.temperature
    }

    fn read_illuminance(&mut self) -> Result<f32, ReadError> {
        self.reads += 1;
        self.lux
    }

    fn read_tilt(&mut self) -> Result<bool, ReadError> {
        self.reads += 1;
        self.tilted
    }
}

impl ActuatorPort for MockHardware {
    fn set_motor_duty_cycle(&mut self, duty_ms: f32) -> Result<(), WriteError> {
        if let Some(e) = self.motor_error {
            return Err(e);
        }
        self.calls.push(ActuatorCall::Motor(duty_ms));
        Ok(())
    }

    fn set_led(&mut self, pin: u8, on: bool) -> Result<(), WriteError> {
        self.calls.push(ActuatorCall::Led { pin, on });
        Ok(())
    }

    fn close_motor(&mut self) {
        self.calls.push(ActuatorCall::CloseMotor);
    }

    fn close_led(&mut self, pin: u8) {
        self.calls.push(ActuatorCall::CloseLed(pin));
    }
}

// ── StaticConfig ──────────────────────────────────────────────

/// Config source backed by an in-memory JSON document.
pub struct StaticConfig(pub &'static str);

impl ConfigPort for StaticConfig {
    fn load(&self) -> Result<ControllerConfig, ConfigError> {
        ControllerConfig::from_json(self.0)
    }
}

// ── LogSink ───────────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
