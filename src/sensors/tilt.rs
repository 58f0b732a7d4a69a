//! Ball tilt switch on a digital input.
//!
//! The switch pulls the input high when the rover leans past its trip angle.
//! Boards wired to ground instead use [`TiltSwitch::active_low`].

use embedded_hal::digital::InputPin;

use super::TiltSensor;
use crate::error::ReadError;

pub struct TiltSwitch<P> {
    pin: P,
    active_high: bool,
}

impl<P: InputPin> TiltSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_high: true,
        }
    }

    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_high: false,
        }
    }
}

impl<P: InputPin> TiltSensor for TiltSwitch<P> {
    fn is_tilted(&mut self) -> Result<bool, ReadError> {
        let high = self.pin.is_high().map_err(|_| ReadError::GpioFailed)?;
        Ok(high == self.active_high)
    }
}
