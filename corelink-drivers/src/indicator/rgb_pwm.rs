//! RGB LED on three PWM channels
//!
//! Channel values are 16-bit and are scaled onto whatever duty range the
//! PWM slice was configured with.

use embedded_hal::pwm::SetDutyCycle;

use corelink_core::traits::{Indicator, IndicatorError, Rgb};

/// Common-cathode RGB LED
pub struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    current: Rgb,
}

impl<R, G, B> RgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self {
            red,
            green,
            blue,
            current: Rgb::OFF,
        }
    }

    /// Last colour applied successfully
    pub fn current(&self) -> Rgb {
        self.current
    }

    pub fn into_channels(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

impl<R, G, B> Indicator for RgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_color(&mut self, color: Rgb) -> Result<(), IndicatorError> {
        self.red
            .set_duty_cycle_fraction(color.r, Rgb::MAX)
            .map_err(|_| IndicatorError::Pwm)?;
        self.green
            .set_duty_cycle_fraction(color.g, Rgb::MAX)
            .map_err(|_| IndicatorError::Pwm)?;
        self.blue
            .set_duty_cycle_fraction(color.b, Rgb::MAX)
            .map_err(|_| IndicatorError::Pwm)?;
        self.current = color;
        Ok(())
    }
}
