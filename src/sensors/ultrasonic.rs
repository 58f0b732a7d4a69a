//! HC-SR04 ultrasonic ranger.
//!
//! A 10 µs pulse on TRIG starts a measurement; the module then holds ECHO
//! high for as long as the sound took to travel out and back.  Sound covers
//! one centimetre and back in roughly 58 µs at room temperature.
//!
//! Both edges are awaited inside a 30 ms window (≈ 5 m round trip, well past
//! the module's rated range).  Missing either edge is an
//! [`EchoTimeout`](ReadError::EchoTimeout).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::RangeFinder;
use crate::app::ports::MonotonicClock;
use crate::error::ReadError;

const SETTLE_US: u32 = 2;
const TRIGGER_PULSE_US: u32 = 10;
const ECHO_WINDOW_US: u64 = 30_000;
const US_PER_CM_ROUND_TRIP: f32 = 58.0;

pub struct Hcsr04<T, E, D, C> {
    trig: T,
    echo: E,
    delay: D,
    clock: C,
}

impl<T, E, D, C> Hcsr04<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: MonotonicClock,
{
    pub fn new(trig: T, echo: E, delay: D, clock: C) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
        }
    }

    fn pulse_trigger(&mut self) -> Result<(), ReadError> {
        self.trig.set_low().map_err(|_| ReadError::GpioFailed)?;
        self.delay.delay_us(SETTLE_US);
        self.trig.set_high().map_err(|_| ReadError::GpioFailed)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trig.set_low().map_err(|_| ReadError::GpioFailed)
    }

    /// Spin until ECHO reads `high`; returns the timestamp of the edge.
    fn wait_for_echo(&mut self, high: bool) -> Result<u64, ReadError> {
        let start = self.clock.now_us();
        loop {
            let level = self.echo.is_high().map_err(|_| ReadError::GpioFailed)?;
            let now = self.clock.now_us();
            if level == high {
                return Ok(now);
            }
            if now.saturating_sub(start) > ECHO_WINDOW_US {
                return Err(ReadError::EchoTimeout);
            }
        }
    }
}

impl<T, E, D, C> RangeFinder for Hcsr04<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: MonotonicClock,
{
    fn measure_cm(&mut self) -> Result<f32, ReadError> {
        self.pulse_trigger()?;
        let rise = self.wait_for_echo(true)?;
        let fall = self.wait_for_echo(false)?;
        Ok(fall.saturating_sub(rise) as f32 / US_PER_CM_ROUND_TRIP)
    }
}
