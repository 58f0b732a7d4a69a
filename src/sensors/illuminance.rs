//! BH1750 ambient light sensor over I2C.
//!
//! The sensor is powered on and put into continuous high-resolution mode on
//! first use, then given one full conversion time before the data register
//! is read.  Until that first conversion lands the register reads zero.
//! A failed configuration is retried on the next read.
//! Each read returns a big-endian count; lux = count / 1.2.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::LightMeter;
use crate::error::ReadError;

pub const DEFAULT_ADDRESS: u8 = 0x23;

const CMD_POWER_ON: u8 = 0x01;
const CMD_CONTINUOUS_HIGH_RES: u8 = 0x10;
const COUNTS_PER_LUX: f32 = 1.2;
/// Worst-case high-resolution conversion time from the datasheet.
pub const CONVERSION_TIME_MS: u32 = 180;

pub struct Bh1750<I, D> {
    bus: I,
    delay: D,
    address: u8,
    configured: bool,
}

impl<I: I2c, D: DelayNs> Bh1750<I, D> {
    pub fn new(bus: I, delay: D) -> Self {
        Self {
            bus,
            delay,
            address: DEFAULT_ADDRESS,
            configured: false,
        }
    }

    fn configure(&mut self) -> Result<(), ReadError> {
        self.bus
            .write(self.address, &[CMD_POWER_ON])
            .map_err(|_| ReadError::BusFailed)?;
        self.bus
            .write(self.address, &[CMD_CONTINUOUS_HIGH_RES])
            .map_err(|_| ReadError::BusFailed)?;
        self.delay.delay_ms(CONVERSION_TIME_MS);
        self.configured = true;
        log::debug!("BH1750 at 0x{:02X} in continuous high-res mode", self.address);
        Ok(())
    }
}

impl<I: I2c, D: DelayNs> LightMeter for Bh1750<I, D> {
    fn measure_lux(&mut self) -> Result<f32, ReadError> {
        if !self.configured {
            self.configure()?;
        }
        let mut buf = [0u8; 2];
        self.bus
            .read(self.address, &mut buf)
            .map_err(|_| ReadError::BusFailed)?;
        Ok(u16::from_be_bytes(buf) as f32 / COUNTS_PER_LUX)
    }
}
