//! GPIO / peripheral pin assignments for the RCC rover board (ESP32-S3).
//!
//! Single source of truth: the board wiring and the default configuration
//! reference this module rather than hard-coding numbers.  `board::build`
//! must take the matching `Peripherals` fields.

// ---------------------------------------------------------------------------
// Ultrasonic rangers (HC-SR04, echo through a 5 V → 3.3 V divider)
// ---------------------------------------------------------------------------

/// Front ranger trigger output.
pub const FRONT_US_TRIG_GPIO: u8 = 4;
/// Front ranger echo input.
pub const FRONT_US_ECHO_GPIO: u8 = 5;
/// Rear ranger trigger output.
pub const BACK_US_TRIG_GPIO: u8 = 6;
/// Rear ranger echo input.
pub const BACK_US_ECHO_GPIO: u8 = 7;

// ---------------------------------------------------------------------------
// Digital inputs
// ---------------------------------------------------------------------------

/// Ball tilt switch. HIGH = tilted.
pub const TILT_GPIO: u8 = 15;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Headlight LED (active HIGH).
pub const LED_GPIO: u8 = 18;

/// GPIO routed to LEDC channel 0, driving the motor ESC.
pub const MOTOR_PWM_GPIO: u8 = 12;

// ---------------------------------------------------------------------------
// I²C buses: one sensor per controller
// ---------------------------------------------------------------------------

/// I2C0: MLX90614 IR thermometer.
pub const THERMO_SDA_GPIO: u8 = 8;
pub const THERMO_SCL_GPIO: u8 = 9;

/// I2C1: BH1750 light sensor.
pub const LIGHT_SDA_GPIO: u8 = 10;
pub const LIGHT_SCL_GPIO: u8 = 11;

/// Both sensors are rated for standard-mode I2C.
pub const I2C_BAUD_HZ: u32 = 100_000;
