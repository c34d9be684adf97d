//! Applies reductions and notifications to the display and indicator
//!
//! Every drawing sequence is best effort: a failing display or indicator
//! is counted in [`DiagnosticCounters`] and the sequence carries on, so
//! dwell times are honoured even with a dead panel.

use core::fmt::Write;
use core::net::Ipv4Addr;

use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::config::{IndicatorConfig, PresentationConfig};
use crate::diagnostics::{Diagnostic, DiagnosticCounters};
use crate::reducer::Reduction;
use crate::traits::{DisplayError, Indicator, IndicatorError, StatusDisplay, StatusDisplayExt};

/// Row of the status, diagnostic, address and keep-alive lines
pub const STATUS_ROW: u8 = 0;
/// Row of the messaging client line
pub const CLIENT_ROW: u8 = 16;
/// Row of the acknowledgement line
pub const ACK_ROW: u8 = 32;

/// Acknowledgement text
pub const ACK_TEXT: &str = "PING ACK OK";
/// Keep-alive confirmation text
pub const KEEPALIVE_TEXT: &str = "PING sent...";

/// Longest line the presenter composes
pub const LINE_LEN: usize = 48;

/// Drives the status display and the RGB indicator
pub struct Presenter<D, L> {
    display: D,
    indicator: L,
    timing: PresentationConfig,
    status_level: u16,
}

impl<D: StatusDisplay, L: Indicator> Presenter<D, L> {
    pub fn new(
        display: D,
        indicator: L,
        timing: PresentationConfig,
        indicator_cfg: IndicatorConfig,
    ) -> Self {
        Self {
            display,
            indicator,
            timing,
            status_level: indicator_cfg.status_level,
        }
    }

    /// Show the boot banner, wait, then blank the screen
    pub async fn banner<W: DelayNs>(&mut self, delay: &mut W, counters: &mut DiagnosticCounters) {
        let result = self
            .display
            .clear()
            .and_then(|()| self.display.draw_text(0, STATUS_ROW, "Core 0"))
            .and_then(|()| self.display.draw_text(0, CLIENT_ROW, "Starting!"))
            .and_then(|()| self.display.present());
        note_display(result, counters);

        delay.delay_ms(self.timing.boot_banner_ms).await;
        self.clear(counters);
    }

    /// Apply one reduction
    pub async fn show<W: DelayNs>(
        &mut self,
        reduction: &Reduction,
        delay: &mut W,
        counters: &mut DiagnosticCounters,
    ) {
        match *reduction {
            Reduction::Ack { color, .. } => {
                note_indicator(self.indicator.set_color(color), counters);
                self.draw(0, ACK_ROW, ACK_TEXT, counters);
                // Colour and text stay up until something else replaces them
                delay.delay_ms(self.timing.ack_hold_ms).await;
            }
            Reduction::Status(outcome) => {
                note_indicator(
                    self.indicator.set_color(outcome.color(self.status_level)),
                    counters,
                );
                let mut line: String<LINE_LEN> = String::new();
                let _ = line.push_str("WiFi status: ");
                push_truncated(&mut line, outcome.label());
                self.draw(0, STATUS_ROW, &line, counters);
                delay.delay_ms(self.timing.status_dwell_ms).await;
                self.clear(counters);
            }
        }
    }

    /// Show a dropped-event message for the diagnostic dwell, then clear
    pub async fn show_diagnostic<W: DelayNs>(
        &mut self,
        diagnostic: &Diagnostic,
        delay: &mut W,
        counters: &mut DiagnosticCounters,
    ) {
        self.draw(0, STATUS_ROW, diagnostic.message(), counters);
        delay.delay_ms(self.timing.diagnostic_dwell_ms).await;
        self.clear(counters);
    }

    /// Replace the screen with the dotted-quad address
    pub fn show_address(&mut self, addr: Ipv4Addr, counters: &mut DiagnosticCounters) {
        // "255.255.255.255" is 15 bytes
        let mut text: String<15> = String::new();
        let result = write!(text, "{}", addr)
            .map_err(|_| DisplayError::OutOfBounds)
            .and_then(|()| self.display.clear())
            .and_then(|()| self.display.show_text(0, STATUS_ROW, &text));
        note_display(result, counters);
    }

    /// Show the messaging client state line
    pub fn show_client_status(&mut self, text: &str, counters: &mut DiagnosticCounters) {
        let mut line: String<LINE_LEN> = String::new();
        let _ = line.push_str("MQTT: ");
        push_truncated(&mut line, text);
        self.draw(0, CLIENT_ROW, &line, counters);
    }

    /// Confirm a keep-alive publish
    pub fn show_keepalive_sent(&mut self, counters: &mut DiagnosticCounters) {
        self.draw(0, STATUS_ROW, KEEPALIVE_TEXT, counters);
    }

    /// Blank the screen
    pub fn clear(&mut self, counters: &mut DiagnosticCounters) {
        note_display(self.display.blank(), counters);
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn indicator(&self) -> &L {
        &self.indicator
    }

    fn draw(&mut self, x: u8, y: u8, text: &str, counters: &mut DiagnosticCounters) {
        note_display(self.display.show_text(x, y, text), counters);
    }
}

/// Append as much of `text` as fits, cutting on a char boundary
fn push_truncated<const N: usize>(line: &mut String<N>, text: &str) {
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
}

fn note_display(result: Result<(), DisplayError>, counters: &mut DiagnosticCounters) {
    if result.is_err() {
        counters.display_faults = counters.display_faults.saturating_add(1);
    }
}

fn note_indicator(result: Result<(), IndicatorError>, counters: &mut DiagnosticCounters) {
    if result.is_err() {
        counters.indicator_faults = counters.indicator_faults.saturating_add(1);
    }
}
