//! Unified error types for the RCC controller.
//!
//! Two I/O error kinds cross the port boundary: [`ReadError`] for sensor
//! transport failures and [`WriteError`] for actuator channel failures.
//! Both are `Copy` so they can be logged, wrapped in events, and matched
//! on without allocation.  [`DispatchError`] covers timer-table misuse.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read.
    Read(ReadError),
    /// An actuator command failed.
    Write(WriteError),
    /// The timer dispatcher rejected a request.
    Dispatch(DispatchError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "read: {e}"),
            Self::Write(e) => write!(f, "write: {e}"),
            Self::Dispatch(e) => write!(f, "dispatch: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor read errors
// ---------------------------------------------------------------------------

/// The sensor transport did not answer within its expected window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// Ultrasonic echo never rose, or never fell, inside the echo window.
    EchoTimeout,
    /// A GPIO line could not be driven or sampled.
    GpioFailed,
    /// The I2C transaction was not acknowledged.
    BusFailed,
    /// The device answered but flagged the sample as invalid.
    InvalidData,
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EchoTimeout => write!(f, "echo timeout"),
            Self::GpioFailed => write!(f, "GPIO access failed"),
            Self::BusFailed => write!(f, "I2C transfer failed"),
            Self::InvalidData => write!(f, "invalid sample"),
        }
    }
}

impl core::error::Error for ReadError {}

impl From<ReadError> for Error {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator write errors
// ---------------------------------------------------------------------------

/// The output channel could not be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteError {
    /// PWM duty-cycle write failed or the channel is unavailable.
    PwmUnavailable,
    /// GPIO set failed.
    GpioFailed,
    /// Requested duty lies outside `0..=period`.
    DutyOutOfRange,
    /// No output is wired to the requested pin.
    UnknownPin(u8),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmUnavailable => write!(f, "PWM channel unavailable"),
            Self::GpioFailed => write!(f, "GPIO write failed"),
            Self::DutyOutOfRange => write!(f, "duty cycle outside PWM period"),
            Self::UnknownPin(pin) => write!(f, "no output on pin {pin}"),
        }
    }
}

impl core::error::Error for WriteError {}

impl From<WriteError> for Error {
    fn from(e: WriteError) -> Self {
        Self::Write(e)
    }
}

// ---------------------------------------------------------------------------
// Dispatcher errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Every timer slot is occupied.
    TableFull,
    /// The handle was already released (or never issued by this table).
    StaleHandle,
    /// A zero period would fire on every dispatch.
    ZeroPeriod,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableFull => write!(f, "timer table full"),
            Self::StaleHandle => write!(f, "stale timer handle"),
            Self::ZeroPeriod => write!(f, "timer period must be non-zero"),
        }
    }
}

impl core::error::Error for DispatchError {}

impl From<DispatchError> for Error {
    fn from(e: DispatchError) -> Self {
        Self::Dispatch(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
