//! Hardware adapter: bridges the rover's peripherals to the domain port traits.
//!
//! Owns the [`SensorHub`] and both actuator channels, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module in the
//! system that talks to drivers.  On host builds the drivers are the
//! simulated ones from [`sim`](super::sim).

use log::warn;

use crate::app::ports::{ActuatorPort, Placement, SensorPort, TemperatureSample};
use crate::drivers::{LedChannel, MotorChannel};
use crate::error::{ReadError, WriteError};
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensors: SensorHub,
    motor: Box<dyn MotorChannel>,
    led: Box<dyn LedChannel>,
}

impl HardwareAdapter {
    pub fn new(sensors: SensorHub, motor: Box<dyn MotorChannel>, led: Box<dyn LedChannel>) -> Self {
        Self { sensors, motor, led }
    }

    pub fn motor_open(&self) -> bool {
        self.motor.is_open()
    }

    pub fn led_open(&self) -> bool {
        self.led.is_open()
    }

    fn led_for(&mut self, pin: u8) -> Result<&mut dyn LedChannel, WriteError> {
        if self.led.pin() == pin {
            Ok(self.led.as_mut())
        } else {
            Err(WriteError::UnknownPin(pin))
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_distance(&mut self, placement: Placement) -> Result<f32, ReadError> {
        match placement {
            Placement::Front => self.sensors.front.measure_cm(),
            Placement::Back => self.sensors.back.measure_cm(),
        }
    }

    fn read_temperature(&mut self) -> Result<TemperatureSample, ReadError> {
        self.sensors.thermometer.measure()
    }

    fn read_illuminance(&mut self) -> Result<f32, ReadError> {
        self.sensors.light.measure_lux()
    }

    fn read_tilt(&mut self) -> Result<bool, ReadError> {
        self.sensors.tilt.is_tilted()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_motor_duty_cycle(&mut self, duty_ms: f32) -> Result<(), WriteError> {
        self.motor.set_duty_ms(duty_ms)
    }

    fn set_led(&mut self, pin: u8, on: bool) -> Result<(), WriteError> {
        self.led_for(pin)?.set(on)
    }

    fn close_motor(&mut self) {
        self.motor.close();
    }

    fn close_led(&mut self, pin: u8) {
        match self.led_for(pin) {
            Ok(led) => led.close(),
            Err(e) => warn!("close_led: {}", e),
        }
    }
}
