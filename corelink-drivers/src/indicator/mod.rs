//! Indicator drivers

pub mod rgb_pwm;

pub use rgb_pwm::RgbLed;
