//! Display driver trait for the status OLED

/// Errors that can occur with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Coordinates outside the panel
    OutOfBounds,
}

/// Trait for a text status display
///
/// Drawing goes to an off-screen buffer; nothing is visible until
/// [`StatusDisplay::present`] transfers it to the panel.
pub trait StatusDisplay {
    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at pixel `(x, y)`
    ///
    /// Text that does not fit on one line wraps onto the following lines.
    fn draw_text(&mut self, x: u8, y: u8, text: &str) -> Result<(), DisplayError>;

    /// Transfer the frame buffer to the panel
    fn present(&mut self) -> Result<(), DisplayError>;
}

/// Helper trait for common display sequences
pub trait StatusDisplayExt: StatusDisplay {
    /// Draw text and present it in one go
    fn show_text(&mut self, x: u8, y: u8, text: &str) -> Result<(), DisplayError> {
        self.draw_text(x, y, text)?;
        self.present()
    }

    /// Clear the buffer and present the blank screen
    fn blank(&mut self) -> Result<(), DisplayError> {
        self.clear()?;
        self.present()
    }
}

// Blanket implementation for all StatusDisplay types
impl<T: StatusDisplay> StatusDisplayExt for T {}
