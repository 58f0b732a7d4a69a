//! Indicator LED on a GPIO output (active high).

use embedded_hal::digital::OutputPin;

use super::LedChannel;
use crate::error::WriteError;

pub struct Led<P> {
    pin: P,
    gpio: u8,
    lit: bool,
    open: bool,
}

impl<P: OutputPin> Led<P> {
    /// `gpio` is the pin number the controller addresses this LED by.
    pub fn new(pin: P, gpio: u8) -> Self {
        Self {
            pin,
            gpio,
            lit: false,
            open: false,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

impl<P: OutputPin> LedChannel for Led<P> {
    fn pin(&self) -> u8 {
        self.gpio
    }

    fn set(&mut self, on: bool) -> Result<(), WriteError> {
        self.pin
            .set_state(on.into())
            .map_err(|_| WriteError::GpioFailed)?;
        self.lit = on;
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        if self.pin.set_low().is_err() {
            log::warn!("led{}: failed to switch off on close", self.gpio);
        }
        self.lit = false;
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
