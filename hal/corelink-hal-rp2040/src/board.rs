//! BitDogLab board pin map
//!
//! | Function        | GPIO | Peripheral          |
//! |-----------------|------|---------------------|
//! | OLED SDA        | 14   | I2C1                |
//! | OLED SCL        | 15   | I2C1                |
//! | RGB LED green   | 11   | PWM slice 5, chan B |
//! | RGB LED blue    | 12   | PWM slice 6, chan A |
//! | RGB LED red     | 13   | PWM slice 6, chan B |

use corelink_drivers::display::Ssd1306;
use corelink_drivers::indicator::RgbLed;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::{
    I2C1, PIN_11, PIN_12, PIN_13, PIN_14, PIN_15, PWM_SLICE5, PWM_SLICE6,
};
use embassy_rp::pwm::{self, Pwm, PwmOutput};
use embassy_rp::Peri;

/// OLED bus clock
pub const OLED_I2C_FREQUENCY: u32 = 400_000;

/// PWM wrap value, gives a full 16-bit duty range
pub const LED_PWM_TOP: u16 = u16::MAX;

/// Status OLED on I2C1
pub type BoardDisplay = Ssd1306<I2c<'static, I2C1, Blocking>>;

/// RGB LED channels in red, green, blue order
pub type BoardLed = RgbLed<PwmOutput<'static>, PwmOutput<'static>, PwmOutput<'static>>;

/// Board setup errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// A PWM slice did not hand out the expected output
    PwmChannel,
}

/// Peripherals used by the status display
pub struct DisplayPeripherals {
    pub i2c: Peri<'static, I2C1>,
    pub sda: Peri<'static, PIN_14>,
    pub scl: Peri<'static, PIN_15>,
}

/// Peripherals used by the RGB LED
pub struct LedPeripherals {
    pub slice5: Peri<'static, PWM_SLICE5>,
    pub slice6: Peri<'static, PWM_SLICE6>,
    pub green: Peri<'static, PIN_11>,
    pub blue: Peri<'static, PIN_12>,
    pub red: Peri<'static, PIN_13>,
}

/// Create the OLED driver
///
/// The panel still needs [`Ssd1306::init`] before use.
pub fn status_display(p: DisplayPeripherals) -> BoardDisplay {
    let mut config = i2c::Config::default();
    config.frequency = OLED_I2C_FREQUENCY;
    Ssd1306::new(I2c::new_blocking(p.i2c, p.scl, p.sda, config))
}

/// Create the RGB LED driver, all channels off
pub fn rgb_led(p: LedPeripherals) -> Result<BoardLed, BoardError> {
    let mut config = pwm::Config::default();
    config.top = LED_PWM_TOP;
    config.compare_a = 0;
    config.compare_b = 0;

    let (_, green) = Pwm::new_output_b(p.slice5, p.green, config.clone()).split();
    let (blue, red) = Pwm::new_output_ab(p.slice6, p.blue, p.red, config).split();

    match (red, green, blue) {
        (Some(red), Some(green), Some(blue)) => Ok(RgbLed::new(red, green, blue)),
        _ => Err(BoardError::PwmChannel),
    }
}
