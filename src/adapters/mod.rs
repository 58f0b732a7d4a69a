//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `config_file`  | ConfigPort         | JSON file named by env var   |
//! | `hardware`     | SensorPort         | rangers, I2C sensors, tilt   |
//! |                | ActuatorPort       | motor PWM, LED GPIO          |
//! | `log_sink`     | EventSink          | Serial / stderr log output   |
//! | `sim`          | (builds hardware)  | Scripted host peripherals    |
//! | `time`         | MonotonicClock     | ESP32 system timer / Instant |

pub mod config_file;
pub mod hardware;
pub mod log_sink;
#[cfg(not(target_os = "espidf"))]
pub mod sim;
pub mod time;
