//! Board bring-up: builds the [`HardwareAdapter`] for the current target.
//!
//! - **`target_os = "espidf"`**: takes the ESP32-S3 peripherals and wires
//!   each driver to the pins listed in [`pins`](crate::pins).
//! - **host**: a scripted [`SimulatedHardware`](crate::adapters::sim::SimulatedHardware)
//!   rover, so the binary runs end to end without a board.

use log::info;

use crate::adapters::hardware::HardwareAdapter;
use crate::config::ControllerConfig;
use crate::pins;

fn log_wiring(cfg: &ControllerConfig) {
    info!(
        "Board: front US trig={} echo={} | back US trig={} echo={}",
        pins::FRONT_US_TRIG_GPIO,
        pins::FRONT_US_ECHO_GPIO,
        pins::BACK_US_TRIG_GPIO,
        pins::BACK_US_ECHO_GPIO
    );
    info!(
        "Board: MLX90614 sda={} scl={} | BH1750 sda={} scl={} | {} Hz",
        pins::THERMO_SDA_GPIO,
        pins::THERMO_SCL_GPIO,
        pins::LIGHT_SDA_GPIO,
        pins::LIGHT_SCL_GPIO,
        pins::I2C_BAUD_HZ
    );
    info!(
        "Board: tilt={} led={} motor pwm={} @ {} Hz, {:.1} ms period",
        pins::TILT_GPIO,
        cfg.led_pin,
        pins::MOTOR_PWM_GPIO,
        cfg.motor_pwm_frequency_hz(),
        cfg.motor_pwm_period_ms
    );
}

#[cfg(target_os = "espidf")]
pub fn build(cfg: &ControllerConfig) -> anyhow::Result<HardwareAdapter> {
    use esp_idf_hal::delay::Ets;
    use esp_idf_hal::gpio::PinDriver;
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::ledc::config::TimerConfig;
    use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_hal::units::FromValueType;

    use crate::adapters::time::SystemClock;
    use crate::drivers::led::Led;
    use crate::drivers::motor::PwmMotor;
    use crate::sensors::SensorHub;
    use crate::sensors::illuminance::Bh1750;
    use crate::sensors::temperature::Mlx90614;
    use crate::sensors::tilt::TiltSwitch;
    use crate::sensors::ultrasonic::Hcsr04;

    if cfg.led_pin != pins::LED_GPIO {
        anyhow::bail!("led_pin {} is not wired on this board (LED is on GPIO{})", cfg.led_pin, pins::LED_GPIO);
    }
    log_wiring(cfg);

    let p = Peripherals::take()?;
    let clock = SystemClock::new();

    // Field names must track the numbers in `pins`.
    let front = Hcsr04::new(
        PinDriver::output(p.pins.gpio4)?,
        PinDriver::input(p.pins.gpio5)?,
        Ets,
        clock,
    );
    let back = Hcsr04::new(
        PinDriver::output(p.pins.gpio6)?,
        PinDriver::input(p.pins.gpio7)?,
        Ets,
        clock,
    );

    let i2c_cfg = I2cConfig::new().baudrate(pins::I2C_BAUD_HZ.Hz());
    let thermo_bus = I2cDriver::new(p.i2c0, p.pins.gpio8, p.pins.gpio9, &i2c_cfg)?;
    let light_bus = I2cDriver::new(p.i2c1, p.pins.gpio10, p.pins.gpio11, &i2c_cfg)?;

    let tilt = TiltSwitch::new(PinDriver::input(p.pins.gpio15)?);

    // Duty is scaled against the period the timer really runs at.
    let pwm_freq_hz = cfg.motor_pwm_frequency_hz();
    let pwm_period_ms = 1000.0 / pwm_freq_hz as f32;
    let timer_cfg = TimerConfig::new()
        .frequency(pwm_freq_hz.Hz())
        .resolution(Resolution::Bits14);
    // The channel borrows its timer for the rest of the program.
    let timer: &'static LedcTimerDriver<'static, _> = Box::leak(Box::new(LedcTimerDriver::new(p.ledc.timer0, &timer_cfg)?));
    let mut pwm = LedcDriver::new(p.ledc.channel0, timer, p.pins.gpio12)?;
    pwm.set_duty(0)?;
    pwm.enable()?;

    let sensors = SensorHub::new(
        Box::new(front),
        Box::new(back),
        Box::new(Mlx90614::new(thermo_bus)),
        Box::new(Bh1750::new(light_bus, Ets)),
        Box::new(tilt),
    );
    let motor = PwmMotor::new(pwm, pwm_period_ms);
    let led = Led::new(PinDriver::output(p.pins.gpio18)?, pins::LED_GPIO);

    info!("Board: peripherals ready");
    Ok(HardwareAdapter::new(sensors, Box::new(motor), Box::new(led)))
}

#[cfg(not(target_os = "espidf"))]
pub fn build(cfg: &ControllerConfig) -> anyhow::Result<HardwareAdapter> {
    use crate::adapters::sim::SimulatedHardware;

    log_wiring(cfg);
    info!("Board: host build, using simulated peripherals");
    let (hw, _outputs) = SimulatedHardware::default().into_adapter(cfg);
    Ok(hw)
}
