//! Drive motor on a PWM channel.
//!
//! The motor controller expects a servo-style signal: a fixed period (20 ms
//! by default) with the on-time selecting speed.  Duty is therefore given in
//! milliseconds and scaled onto the channel's raw duty range.
//!
//! The driver is a dumb actuator.  Which duty to apply is decided by the
//! evaluator.

use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use super::MotorChannel;
use crate::error::WriteError;

pub struct PwmMotor<P> {
    pwm: P,
    period_ms: f32,
    duty_ms: f32,
    open: bool,
}

impl<P: SetDutyCycle> PwmMotor<P> {
    /// Wrap a PWM channel already configured for a `period_ms` period.
    /// The channel starts closed.
    pub fn new(pwm: P, period_ms: f32) -> Self {
        Self {
            pwm,
            period_ms,
            duty_ms: 0.0,
            open: false,
        }
    }

    /// Last on-time written (0 after close).
    pub fn duty_ms(&self) -> f32 {
        self.duty_ms
    }

    fn raw_duty(&self, duty_ms: f32) -> u16 {
        let max = self.pwm.max_duty_cycle() as f32;
        ((duty_ms / self.period_ms) * max).round() as u16
    }
}

impl<P: SetDutyCycle> MotorChannel for PwmMotor<P> {
    fn set_duty_ms(&mut self, duty_ms: f32) -> Result<(), WriteError> {
        if !(0.0..=self.period_ms).contains(&duty_ms) {
            return Err(WriteError::DutyOutOfRange);
        }
        let raw = self.raw_duty(duty_ms);
        self.pwm
            .set_duty_cycle(raw)
            .map_err(|_| WriteError::PwmUnavailable)?;
        if !self.open {
            debug!("motor: PWM channel opened");
            self.open = true;
        }
        self.duty_ms = duty_ms;
        Ok(())
    }

    fn close(&mut self) {
        if self.pwm.set_duty_cycle_fully_off().is_err() {
            log::warn!("motor: failed to drive PWM off on close");
        }
        self.duty_ms = 0.0;
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
