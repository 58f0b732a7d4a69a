//! Simulated rover for host runs.
//!
//! Sensors replay scripted readings; each read advances the script and wraps
//! at its end.  Actuators are the real [`PwmMotor`] and [`Led`] drivers on
//! top of in-memory PWM and GPIO outputs, so a host run exercises the same
//! duty scaling and channel bookkeeping as the board.  A [`SimOutputs`]
//! observes those outputs.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType as PinErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};

use super::hardware::HardwareAdapter;
use crate::app::ports::TemperatureSample;
use crate::config::ControllerConfig;
use crate::drivers::led::Led;
use crate::drivers::motor::PwmMotor;
use crate::error::ReadError;
use crate::sensors::tilt::TiltSwitch;
use crate::sensors::{LightMeter, RangeFinder, SensorHub, Thermometer};

/// Raw duty resolution of the simulated PWM channel (14-bit, like LEDC).
pub const SIM_MAX_DUTY: u16 = (1 << 14) - 1;

// ───────────────────────────────────────────────────────────────
// Scripts
// ───────────────────────────────────────────────────────────────

/// Cyclic sequence of sensor results.
#[derive(Debug, Clone)]
pub struct Script<T> {
    values: Vec<Result<T, ReadError>>,
    cursor: usize,
}

impl<T: Copy> Script<T> {
    pub fn new(values: Vec<Result<T, ReadError>>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always return `value`.
    pub fn constant(value: T) -> Self {
        Self::new(vec![Ok(value)])
    }

    /// Replay `values` in order, forever.
    pub fn cycle(values: &[T]) -> Self {
        Self::new(values.iter().copied().map(Ok).collect())
    }

    /// Always fail with `error`.
    pub fn failing(error: ReadError) -> Self {
        Self::new(vec![Err(error)])
    }

    fn next(&mut self) -> Result<T, ReadError> {
        let Some(value) = self.values.get(self.cursor).copied() else {
            return Err(ReadError::InvalidData);
        };
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

struct SimRanger(Script<f32>);

impl RangeFinder for SimRanger {
    fn measure_cm(&mut self) -> Result<f32, ReadError> {
        self.0.next()
    }
}

struct SimThermometer(Script<TemperatureSample>);

impl Thermometer for SimThermometer {
    fn measure(&mut self) -> Result<TemperatureSample, ReadError> {
        self.0.next()
    }
}

struct SimLightMeter(Script<f32>);

impl LightMeter for SimLightMeter {
    fn measure_lux(&mut self) -> Result<f32, ReadError> {
        self.0.next()
    }
}

/// Tilt input pin; a failed script entry reads as a GPIO fault.
struct SimTiltPin(Script<bool>);

#[derive(Debug)]
struct SimPinFault;

impl embedded_hal::digital::Error for SimPinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl PinErrorType for SimTiltPin {
    type Error = SimPinFault;
}

impl InputPin for SimTiltPin {
    fn is_high(&mut self) -> Result<bool, SimPinFault> {
        self.0.next().map_err(|_| SimPinFault)
    }

    fn is_low(&mut self) -> Result<bool, SimPinFault> {
        self.is_high().map(|high| !high)
    }
}

// ───────────────────────────────────────────────────────────────
// Outputs
// ───────────────────────────────────────────────────────────────

struct SimPwm(Rc<Cell<u16>>);

impl PwmErrorType for SimPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        SIM_MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.0.set(duty);
        Ok(())
    }
}

struct SimPin(Rc<Cell<bool>>);

impl PinErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }
}

/// Read-only view of the simulated outputs.
#[derive(Debug, Clone)]
pub struct SimOutputs {
    motor_raw: Rc<Cell<u16>>,
    led_high: Rc<Cell<bool>>,
    pwm_period_ms: f32,
}

impl SimOutputs {
    /// Motor on-time implied by the raw PWM duty.
    pub fn motor_duty_ms(&self) -> f32 {
        self.motor_raw.get() as f32 / SIM_MAX_DUTY as f32 * self.pwm_period_ms
    }

    pub fn led_on(&self) -> bool {
        self.led_high.get()
    }
}

// ───────────────────────────────────────────────────────────────
// Builder
// ───────────────────────────────────────────────────────────────

/// Scripted stand-in for the rover's sensors.
#[derive(Debug, Clone)]
pub struct SimulatedHardware {
    pub front_cm: Script<f32>,
    pub back_cm: Script<f32>,
    pub temperature: Script<TemperatureSample>,
    pub lux: Script<f32>,
    pub tilted: Script<bool>,
}

impl Default for SimulatedHardware {
    /// A short drive: an obstacle approaches the front, something follows
    /// close behind for a while, and the lights go out once per cycle.
    fn default() -> Self {
        Self {
            front_cm: Script::cycle(&[180.0, 140.0, 95.0, 60.0, 42.0, 35.0, 120.0, 400.0]),
            back_cm: Script::cycle(&[110.0, 80.0, 28.0, 22.0, 31.0, 75.0]),
            temperature: Script::constant(TemperatureSample {
                object_c: 24.5,
                ambient_c: 21.0,
            }),
            lux: Script::cycle(&[320.0, 0.4]),
            tilted: Script::constant(false),
        }
    }
}

impl SimulatedHardware {
    /// Assemble a [`HardwareAdapter`] over simulated peripherals.
    pub fn into_adapter(self, cfg: &ControllerConfig) -> (HardwareAdapter, SimOutputs) {
        let motor_raw = Rc::new(Cell::new(0));
        let led_high = Rc::new(Cell::new(false));

        let sensors = SensorHub::new(
            Box::new(SimRanger(self.front_cm)),
            Box::new(SimRanger(self.back_cm)),
            Box::new(SimThermometer(self.temperature)),
            Box::new(SimLightMeter(self.lux)),
            Box::new(TiltSwitch::new(SimTiltPin(self.tilted))),
        );
        let motor = PwmMotor::new(SimPwm(motor_raw.clone()), cfg.motor_pwm_period_ms);
        let led = Led::new(SimPin(led_high.clone()), cfg.led_pin);

        let outputs = SimOutputs {
            motor_raw,
            led_high,
            pwm_period_ms: cfg.motor_pwm_period_ms,
        };
        (HardwareAdapter::new(sensors, Box::new(motor), Box::new(led)), outputs)
    }
}
