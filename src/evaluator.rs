//! Threshold evaluation: one pure decision function per sensor kind.
//!
//! Every tick is judged on its own: no hysteresis, no debouncing, no memory
//! of previous readings.  The output is a [`Decision`] that the tick runner
//! applies through the actuator port.
//!
//! | Measurement    | Condition                    | Decision                    |
//! |----------------|------------------------------|-----------------------------|
//! | front distance | `d <= 0` or `d > max range`  | `Unmeasurable`              |
//! |                | `0 < d < front_stop`         | `Motor(Stop)`               |
//! | back distance  | `0 < d < back_near`          | `Motor(Run { low duty })`   |
//! |                | `d >= back_near`             | `Motor(Stop)`               |
//! | temperature    | `object > high`              | `Unimplemented(OverTemp)`   |
//! | illuminance    | `lux < dark`                 | `Led { on: true }`          |
//! | tilt           | tilted                       | `Unimplemented(Tilt)`       |

use crate::app::ports::TemperatureSample;
use crate::config::ControllerConfig;

/// A sensor reading tagged with the sensor it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Front ranger distance in cm.
    FrontDistance(f32),
    /// Rear ranger distance in cm.
    BackDistance(f32),
    /// IR thermometer sample.
    Temperature(TemperatureSample),
    /// Ambient light in lux.
    Illuminance(f32),
    /// Tilt switch state.
    Tilt(bool),
}

/// Motor instruction.  Carries no memory of the previous command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCommand {
    Stop,
    Run { duty_ms: f32 },
}

impl MotorCommand {
    /// PWM on-time to write for this command.
    pub fn duty_ms(self) -> f32 {
        match self {
            Self::Stop => 0.0,
            Self::Run { duty_ms } => duty_ms,
        }
    }
}

/// A threshold branch whose response has not been decided yet.
///
/// The evaluator reports these instead of inventing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyGap {
    /// Object temperature exceeded the configured high threshold.
    OverTemperature,
    /// The tilt switch closed.
    TiltDetected,
}

/// What one tick of one sensor asks the actuators to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Reading is in range and needs no response.
    NoAction,
    /// Reading is outside the sensor's meaningful range; nothing is actuated.
    Unmeasurable,
    /// Write this command to the drive motor.
    Motor(MotorCommand),
    /// Drive the LED on `pin`.
    Led { pin: u8, on: bool },
    /// A threshold tripped but no action is defined for it.
    Unimplemented(PolicyGap),
}

/// Threshold values, copied out of [`ControllerConfig`] once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub front_stop_below_cm: f32,
    pub back_near_below_cm: f32,
    pub max_range_cm: f32,
    pub high_temperature_c: f32,
    pub dark_below_lux: f32,
    pub motor_low_duty_ms: f32,
    pub led_pin: u8,
}

impl From<&ControllerConfig> for Thresholds {
    fn from(cfg: &ControllerConfig) -> Self {
        Self {
            front_stop_below_cm: cfg.front_stop_below_cm,
            back_near_below_cm: cfg.back_near_below_cm,
            max_range_cm: cfg.ultrasonic_max_range_cm,
            high_temperature_c: cfg.high_temperature_c,
            dark_below_lux: cfg.dark_below_lux,
            motor_low_duty_ms: cfg.motor_low_duty_ms,
            led_pin: cfg.led_pin,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from(&ControllerConfig::default())
    }
}

/// Dispatch to the evaluator for the measurement's sensor kind.
pub fn evaluate(measurement: &Measurement, th: &Thresholds) -> Decision {
    match *measurement {
        Measurement::FrontDistance(cm) => evaluate_front_distance(cm, th),
        Measurement::BackDistance(cm) => evaluate_back_distance(cm, th),
        Measurement::Temperature(sample) => evaluate_temperature(sample, th),
        Measurement::Illuminance(lux) => evaluate_illuminance(lux, th),
        Measurement::Tilt(tilted) => evaluate_tilt(tilted),
    }
}

/// Something close in front stops the motor.
pub fn evaluate_front_distance(cm: f32, th: &Thresholds) -> Decision {
    // Written so that NaN lands in the unmeasurable branch.
    if !(cm > 0.0 && cm <= th.max_range_cm) {
        return Decision::Unmeasurable;
    }
    if cm < th.front_stop_below_cm {
        Decision::Motor(MotorCommand::Stop)
    } else {
        Decision::NoAction
    }
}

/// Something close behind drives the motor at low duty; otherwise it stops.
pub fn evaluate_back_distance(cm: f32, th: &Thresholds) -> Decision {
    if cm > 0.0 && cm < th.back_near_below_cm {
        Decision::Motor(MotorCommand::Run {
            duty_ms: th.motor_low_duty_ms,
        })
    } else if cm >= th.back_near_below_cm {
        Decision::Motor(MotorCommand::Stop)
    } else {
        Decision::NoAction
    }
}

/// An object reading of exactly 0.0 means the thermometer has no sample yet.
pub fn evaluate_temperature(sample: TemperatureSample, th: &Thresholds) -> Decision {
    if sample.object_c == 0.0 {
        return Decision::NoAction;
    }
    if sample.object_c > th.high_temperature_c {
        Decision::Unimplemented(PolicyGap::OverTemperature)
    } else {
        Decision::NoAction
    }
}

/// Darkness switches the headlight on.  Brightness never switches it off.
pub fn evaluate_illuminance(lux: f32, th: &Thresholds) -> Decision {
    if lux < th.dark_below_lux {
        Decision::Led {
            pin: th.led_pin,
            on: true,
        }
    } else {
        Decision::NoAction
    }
}

pub fn evaluate_tilt(tilted: bool) -> Decision {
    if tilted {
        Decision::Unimplemented(PolicyGap::TiltDetected)
    } else {
        Decision::NoAction
    }
}
