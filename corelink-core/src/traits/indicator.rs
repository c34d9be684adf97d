//! RGB indicator trait

/// Errors that can occur while driving the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorError {
    /// PWM channel rejected the duty cycle
    Pwm,
}

/// Colour with 16-bit channel depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Rgb {
    /// Full-scale channel value
    pub const MAX: u16 = u16::MAX;

    /// Indicator off
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    /// Create a colour
    pub const fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }
}

/// Trait for an RGB indicator
pub trait Indicator {
    /// Drive all three channels
    fn set_color(&mut self, color: Rgb) -> Result<(), IndicatorError>;
}
