//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks, config, clock) implement
//! these traits.  The [`ControllerService`](super::service::ControllerService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::config::ControllerConfig;
use crate::error::{ReadError, WriteError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Which ultrasonic ranger to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Front,
    Back,
}

/// One IR thermometer sample (°C).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSample {
    pub object_c: f32,
    pub ambient_c: f32,
}

/// Read-side port: the domain calls this once per tick per sensor.
///
/// Every read is a single attempt.  Implementations must not retry.
pub trait SensorPort {
    /// Fire the ranger at `placement` and return the echo distance in cm.
    fn read_distance(&mut self, placement: Placement) -> Result<f32, ReadError>;

    /// Read object and ambient temperature from the IR thermometer.
    fn read_temperature(&mut self) -> Result<TemperatureSample, ReadError>;

    /// Read ambient light in lux.
    fn read_illuminance(&mut self) -> Result<f32, ReadError>;

    /// Sample the tilt switch (`true` = tilted).
    fn read_tilt(&mut self) -> Result<bool, ReadError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
///
/// Every write is idempotent; reissuing a command leaves the output in the
/// same state.  A closed channel reopens on its next write.
pub trait ActuatorPort {
    /// Set the motor PWM on-time in milliseconds (0 = stopped).
    fn set_motor_duty_cycle(&mut self, duty_ms: f32) -> Result<(), WriteError>;

    /// Drive the LED wired to `pin`.
    fn set_led(&mut self, pin: u8, on: bool) -> Result<(), WriteError>;

    /// Stop the motor and release its PWM channel.
    fn close_motor(&mut self);

    /// Switch the LED off and release its GPIO.
    fn close_led(&mut self, pin: u8);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ← config source)
// ───────────────────────────────────────────────────────────────

/// Loads controller configuration.
///
/// Implementations must run [`ControllerConfig::validate`] before handing
/// a config to the domain.
pub trait ConfigPort {
    fn load(&self) -> Result<ControllerConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait MonotonicClock {
    /// Microseconds since an arbitrary fixed origin.
    fn now_us(&self) -> u64;

    /// Milliseconds since the same origin.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1_000
    }
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config source found.
    NotFound,
    /// Config source could not be parsed.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the config backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::error::Error for ConfigError {}
