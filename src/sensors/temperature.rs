//! MLX90614 infrared thermometer over I2C (SMBus).
//!
//! Object and ambient temperatures live in RAM registers 0x07 and 0x06 as
//! 16-bit little-endian words in units of 0.02 K.  Bit 15 set flags a
//! sensor-side error.  The SMBus PEC byte that follows each word is read but
//! not verified.

use embedded_hal::i2c::I2c;

use super::Thermometer;
use crate::app::ports::TemperatureSample;
use crate::error::ReadError;

pub const DEFAULT_ADDRESS: u8 = 0x5A;

const REG_AMBIENT: u8 = 0x06;
const REG_OBJECT: u8 = 0x07;
const KELVIN_PER_LSB: f32 = 0.02;
const KELVIN_OFFSET: f32 = 273.15;
const ERROR_FLAG: u16 = 0x8000;

pub struct Mlx90614<I> {
    bus: I,
    address: u8,
}

impl<I: I2c> Mlx90614<I> {
    pub fn new(bus: I) -> Self {
        Self::with_address(bus, DEFAULT_ADDRESS)
    }

    pub fn with_address(bus: I, address: u8) -> Self {
        Self { bus, address }
    }

    fn read_celsius(&mut self, register: u8) -> Result<f32, ReadError> {
        let mut buf = [0u8; 3];
        self.bus
            .write_read(self.address, &[register], &mut buf)
            .map_err(|_| ReadError::BusFailed)?;
        let raw = u16::from_le_bytes([buf[0], buf[1]]);
        if raw & ERROR_FLAG != 0 {
            return Err(ReadError::InvalidData);
        }
        Ok(raw_to_celsius(raw))
    }
}

/// Convert a raw RAM word to degrees Celsius.
pub fn raw_to_celsius(raw: u16) -> f32 {
    raw as f32 * KELVIN_PER_LSB - KELVIN_OFFSET
}

impl<I: I2c> Thermometer for Mlx90614<I> {
    fn measure(&mut self) -> Result<TemperatureSample, ReadError> {
        let object_c = self.read_celsius(REG_OBJECT)?;
        let ambient_c = self.read_celsius(REG_AMBIENT)?;
        Ok(TemperatureSample {
            object_c,
            ambient_c,
        })
    }
}
