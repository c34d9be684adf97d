//! Configuration type definitions

use core::net::Ipv4Addr;

use heapless::String;

/// Maximum keep-alive payload length
pub const MAX_PAYLOAD_LEN: usize = 32;

/// Messaging client settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessagingConfig {
    /// Keep-alive period in milliseconds
    pub keepalive_interval_ms: u32,
    /// Payload published on every keep-alive
    pub keepalive_payload: String<MAX_PAYLOAD_LEN>,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        let mut keepalive_payload = String::new();
        let _ = keepalive_payload.push_str("PING");
        Self {
            keepalive_interval_ms: 5000,
            keepalive_payload,
        }
    }
}

/// Display timing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresentationConfig {
    /// Main loop sleep between iterations
    pub poll_interval_ms: u32,
    /// How long a status line stays up before the display is cleared
    pub status_dwell_ms: u32,
    /// How long a diagnostic stays up before the display is cleared
    pub diagnostic_dwell_ms: u32,
    /// How long the acknowledgement message is held
    pub ack_hold_ms: u32,
    /// How long the boot banner is shown
    pub boot_banner_ms: u32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
            status_dwell_ms: 3000,
            diagnostic_dwell_ms: 3000,
            ack_hold_ms: 1000,
            boot_banner_ms: 3000,
        }
    }
}

/// Indicator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    /// Channel level used for status colours (acknowledgement colours are full scale)
    pub status_level: u16,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            status_level: 0x4000,
        }
    }
}

/// Bench uplink settings (network core without a radio)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Address reported once "associated"
    pub address: Ipv4Addr,
    /// Delay between the INITIALIZING and CONNECTED reports
    pub connect_delay_ms: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            address: Ipv4Addr::new(192, 168, 4, 2),
            connect_delay_ms: 2000,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BenchConfig {
    fn format(&self, f: defmt::Formatter) {
        let [a, b, c, d] = self.address.octets();
        defmt::write!(
            f,
            "BenchConfig {{ address: {}.{}.{}.{}, connect_delay_ms: {} }}",
            a,
            b,
            c,
            d,
            self.connect_delay_ms
        )
    }
}

/// Complete link configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    pub messaging: MessagingConfig,
    pub presentation: PresentationConfig,
    pub indicator: IndicatorConfig,
    pub bench: BenchConfig,
}
