//! Fuzz target: MLX90614 and BH1750 drivers
//!
//! Serves arbitrary bus bytes (and arbitrary bus failures) to both I2C
//! drivers and verifies:
//! - No panics whatever the bus returns
//! - Every successful reading is finite
//! - Light readings are never negative
//!
//! cargo fuzz run fuzz_i2c_sensors

#![no_main]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use libfuzzer_sys::fuzz_target;
use rcc::sensors::illuminance::Bh1750;
use rcc::sensors::temperature::Mlx90614;
use rcc::sensors::{LightMeter, Thermometer};

/// Replays fuzz input as bus traffic.  A zero byte at a transaction
/// boundary fails that transaction.
struct ReplayBus<'a> {
    data: &'a [u8],
}

impl ReplayBus<'_> {
    fn next(&mut self) -> u8 {
        match self.data.split_first() {
            Some((b, rest)) => {
                self.data = rest;
                *b
            }
            None => 0xFF,
        }
    }
}

impl ErrorType for ReplayBus<'_> {
    type Error = ErrorKind;
}

impl I2c for ReplayBus<'_> {
    fn transaction(&mut self, _address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        if self.next() == 0 {
            return Err(ErrorKind::Bus);
        }
        for op in operations {
            if let Operation::Read(buf) = op {
                for b in buf.iter_mut() {
                    *b = self.next();
                }
            }
        }
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fuzz_target!(|data: &[u8]| {
    let (left, right) = data.split_at(data.len() / 2);

    let mut thermo = Mlx90614::new(ReplayBus { data: left });
    for _ in 0..4 {
        if let Ok(sample) = thermo.measure() {
            assert!(sample.object_c.is_finite());
            assert!(sample.ambient_c.is_finite());
        }
    }

    let mut light = Bh1750::new(ReplayBus { data: right }, NoDelay);
    for _ in 0..4 {
        if let Ok(lux) = light.measure_lux() {
            assert!(lux.is_finite() && lux >= 0.0);
        }
    }
});
