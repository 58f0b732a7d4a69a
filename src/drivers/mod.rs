//! Actuator drivers.
//!
//! Like the sensors, each driver is generic over its `embedded-hal` output
//! and exposed to the adapter layer through an object-safe channel trait.

pub mod led;
pub mod motor;

use crate::error::WriteError;

/// A PWM-driven motor whose duty is expressed as on-time per period.
pub trait MotorChannel {
    /// Set the on-time in milliseconds.  Reopens a closed channel.
    fn set_duty_ms(&mut self, duty_ms: f32) -> Result<(), WriteError>;

    /// Drive the output fully off and mark the channel closed.
    fn close(&mut self);

    fn is_open(&self) -> bool;
}

/// A single LED on a GPIO.
pub trait LedChannel {
    /// GPIO number the LED is wired to.
    fn pin(&self) -> u8;

    /// Switch the LED.  Reopens a closed channel.
    fn set(&mut self, on: bool) -> Result<(), WriteError>;

    /// Switch off and mark the channel closed.
    fn close(&mut self);

    fn is_open(&self) -> bool;
}
