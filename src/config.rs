//! Controller configuration parameters
//!
//! All tunable parameters for the RCC controller: task periods, threshold
//! values, and actuator settings.  Loaded through
//! [`ConfigPort`](crate::app::ports::ConfigPort) at startup; missing fields
//! fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::pins;

/// Motor periods the LEDC timer can produce at 14-bit resolution (5 Hz to 1 kHz).
const MOTOR_PWM_PERIOD_RANGE_MS: core::ops::RangeInclusive<f32> = 1.0..=200.0;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Timing ---
    /// Poll period for both ultrasonic rangers (milliseconds)
    pub distance_period_ms: u32,
    /// Poll period for the IR thermometer (milliseconds)
    pub temperature_period_ms: u32,
    /// Poll period for the light sensor (milliseconds)
    pub illuminance_period_ms: u32,
    /// Poll period for the tilt switch (milliseconds)
    pub tilt_period_ms: u32,
    /// How often the host event loop checks for due timers (milliseconds)
    pub loop_poll_interval_ms: u32,
    /// Stop the host event loop after this many seconds (`None` = run forever)
    pub run_for_secs: Option<u32>,

    // --- Distance thresholds ---
    /// Front obstacle closer than this stops the motor (cm)
    pub front_stop_below_cm: f32,
    /// Rear object closer than this starts the motor (cm)
    pub back_near_below_cm: f32,
    /// Ranger readings beyond this are unmeasurable (cm)
    pub ultrasonic_max_range_cm: f32,

    // --- Temperature / light ---
    /// Object temperature above this raises an over-temperature alert (°C)
    pub high_temperature_c: f32,
    /// Illuminance below this switches the LED on (lux)
    pub dark_below_lux: f32,

    // --- Actuators ---
    /// Motor PWM period (milliseconds)
    pub motor_pwm_period_ms: f32,
    /// Motor on-time when backing away from a rear object (milliseconds)
    pub motor_low_duty_ms: f32,
    /// GPIO of the headlight LED
    pub led_pin: u8,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Timing
            distance_period_ms: 1_000,     // 1 Hz
            temperature_period_ms: 60_000, // 1/min
            illuminance_period_ms: 60_000, // 1/min
            tilt_period_ms: 1_000,         // 1 Hz
            loop_poll_interval_ms: 10,
            run_for_secs: None,

            // Distance
            front_stop_below_cm: 50.0,
            back_near_below_cm: 30.0,
            ultrasonic_max_range_cm: 300.0,

            // Temperature / light
            high_temperature_c: 50.0,
            dark_below_lux: 1.0,

            // Actuators
            motor_pwm_period_ms: 20.0,
            motor_low_duty_ms: 10.0,
            led_pin: pins::LED_GPIO,
        }
    }
}

impl ControllerConfig {
    /// Parse a JSON document.  Absent fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            self.distance_period_ms,
            self.temperature_period_ms,
            self.illuminance_period_ms,
            self.tilt_period_ms,
        ];
        if periods.iter().any(|&p| p == 0) {
            return Err(ConfigError::ValidationFailed("task periods must be non-zero"));
        }
        if self.loop_poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "loop_poll_interval_ms must be non-zero",
            ));
        }
        if !(self.ultrasonic_max_range_cm > 0.0 && self.ultrasonic_max_range_cm.is_finite()) {
            return Err(ConfigError::ValidationFailed(
                "ultrasonic_max_range_cm must be positive and finite",
            ));
        }
        if !(self.front_stop_below_cm > 0.0
            && self.front_stop_below_cm <= self.ultrasonic_max_range_cm)
        {
            return Err(ConfigError::ValidationFailed(
                "front_stop_below_cm must be within (0, max range]",
            ));
        }
        if !(self.back_near_below_cm > 0.0
            && self.back_near_below_cm <= self.ultrasonic_max_range_cm)
        {
            return Err(ConfigError::ValidationFailed(
                "back_near_below_cm must be within (0, max range]",
            ));
        }
        if !self.high_temperature_c.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "high_temperature_c must be finite",
            ));
        }
        if !(self.dark_below_lux >= 0.0) {
            return Err(ConfigError::ValidationFailed(
                "dark_below_lux must be non-negative",
            ));
        }
        if !MOTOR_PWM_PERIOD_RANGE_MS.contains(&self.motor_pwm_period_ms) {
            return Err(ConfigError::ValidationFailed(
                "motor_pwm_period_ms must be within [1, 200] ms",
            ));
        }
        if !(0.0..=self.motor_pwm_period_ms).contains(&self.motor_low_duty_ms) {
            return Err(ConfigError::ValidationFailed(
                "motor_low_duty_ms must lie within the PWM period",
            ));
        }
        Ok(())
    }

    /// LEDC timer frequency that reproduces `motor_pwm_period_ms`.
    pub fn motor_pwm_frequency_hz(&self) -> u32 {
        (1000.0 / self.motor_pwm_period_ms).round() as u32
    }
}
