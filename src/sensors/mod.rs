//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! Each driver is generic over its `embedded-hal` bus or pins.  The small
//! object-safe traits below erase those generics so the hub can own a mix of
//! real and simulated drivers behind one type.

pub mod illuminance;
pub mod temperature;
pub mod tilt;
pub mod ultrasonic;

use crate::app::ports::TemperatureSample;
use crate::error::ReadError;

/// Time-of-flight ranger returning centimetres.
pub trait RangeFinder {
    fn measure_cm(&mut self) -> Result<f32, ReadError>;
}

/// Non-contact thermometer.
pub trait Thermometer {
    fn measure(&mut self) -> Result<TemperatureSample, ReadError>;
}

/// Ambient light sensor returning lux.
pub trait LightMeter {
    fn measure_lux(&mut self) -> Result<f32, ReadError>;
}

/// Binary tilt sensor; `true` means tilted.
pub trait TiltSensor {
    fn is_tilted(&mut self) -> Result<bool, ReadError>;
}

/// Owns every sensor driver on the rover.
///
/// Pass in pre-built drivers (built in the board module where peripheral
/// ownership is established).
pub struct SensorHub {
    pub front: Box<dyn RangeFinder>,
    pub back: Box<dyn RangeFinder>,
    pub thermometer: Box<dyn Thermometer>,
    pub light: Box<dyn LightMeter>,
    pub tilt: Box<dyn TiltSensor>,
}

impl SensorHub {
    pub fn new(
        front: Box<dyn RangeFinder>,
        back: Box<dyn RangeFinder>,
        thermometer: Box<dyn Thermometer>,
        light: Box<dyn LightMeter>,
        tilt: Box<dyn TiltSensor>,
    ) -> Self {
        Self {
            front,
            back,
            thermometer,
            light,
            tilt,
        }
    }
}
