//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C.
//! Text is rendered with the embedded-graphics 6x10 font (21 chars per
//! line) into a page-organised frame buffer, then flushed page by page.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;

use corelink_core::traits::{DisplayError, StatusDisplay};

/// SSD1306 I2C address (0x3C, or 0x3D with SA0 high)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

const CHAR_WIDTH: usize = 6;
const LINE_HEIGHT: i32 = 10;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a new driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SSD1306_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Initialize the display
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x00,                  // Horizontal addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::DISPLAY_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        Ok(())
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, cmd])
    }

    /// Flush the frame buffer to the display
    pub fn flush(&mut self) -> Result<(), I2C::Error> {
        // Full-screen window, the address pointer then advances page by page
        for c in [
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ] {
            self.command(c)?;
        }

        for page in 0..PAGES {
            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c.write(self.address, &data)?;
        }

        Ok(())
    }

    /// Returns true if the pixel is lit in the frame buffer
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        let byte = &mut self.buffer[y / 8][x];
        if on {
            *byte |= 1 << (y % 8);
        } else {
            *byte &= !(1 << (y % 8));
        }
    }
}

impl<I2C> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C: I2c> DrawTarget for Ssd1306<I2C> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                if x < WIDTH && y < HEIGHT {
                    self.set_pixel(x, y, color.is_on());
                }
            }
        }
        Ok(())
    }
}

impl<I2C: I2c> StatusDisplay for Ssd1306<I2C> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
        Ok(())
    }

    fn draw_text(&mut self, x: u8, y: u8, text: &str) -> Result<(), DisplayError> {
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return Err(DisplayError::OutOfBounds);
        }

        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let per_line = ((WIDTH - x) / CHAR_WIDTH).max(1);
        let mut cursor = y as i32;

        for paragraph in text.split('\n') {
            let mut rest = paragraph;
            loop {
                if cursor >= HEIGHT as i32 {
                    // Anything below the panel is dropped
                    return Ok(());
                }
                let split = rest
                    .char_indices()
                    .nth(per_line)
                    .map_or(rest.len(), |(i, _)| i);
                let (line, tail) = rest.split_at(split);

                Text::with_baseline(line, Point::new(x as i32, cursor), style, Baseline::Top)
                    .draw(self)
                    .map_err(|never| -> DisplayError { match never {} })?;

                cursor += LINE_HEIGHT;
                rest = tail;
                if rest.is_empty() {
                    break;
                }
            }
        }

        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.flush().map_err(|_| DisplayError::Bus)
    }
}
