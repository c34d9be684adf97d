//! Inbound word format (network core → presentation core)
//!
//! Each word carries an attempt counter in the high half and a status code
//! in the low half. Two attempt values are reserved as signal tags:
//! - `0xFFFE` (ADDRESS_TAG): the next word is an IPv4 address
//! - `0x9999` (ACK_PING): acknowledgement ping, the status half is ignored

use core::net::Ipv4Addr;

/// Attempt value tagging an address notification
pub const ADDRESS_TAG: u16 = 0xFFFE;

/// Attempt value tagging an acknowledgement ping
pub const ACK_PING: u16 = 0x9999;

/// Highest valid status code
pub const MAX_STATUS_CODE: u16 = 2;

/// Errors raised when encoding words on the producer side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WireError {
    /// Attempt counter collides with a reserved tag
    ReservedAttempt(u16),
}

/// Network association status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusCode {
    /// Radio is up, association in progress
    Initializing,
    /// Associated with the access point
    Connected,
    /// Association failed
    Failed,
}

impl StatusCode {
    /// Parse a status code from its wire value
    pub fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            0 => Some(StatusCode::Initializing),
            1 => Some(StatusCode::Connected),
            2 => Some(StatusCode::Failed),
            _ => None,
        }
    }

    /// Convert to wire value
    pub fn as_raw(self) -> u16 {
        match self {
            StatusCode::Initializing => 0,
            StatusCode::Connected => 1,
            StatusCode::Failed => 2,
        }
    }
}

/// A status event as carried by the event queue
///
/// Either a special signal (identified by `attempt` alone) or a status
/// report with `status` in `0..=2`. The fields stay raw so that consumers
/// can be exercised with unvalidated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusEvent {
    /// Attempt counter, or a reserved signal tag
    pub attempt: u16,
    /// Raw status code
    pub status: u16,
}

impl StatusEvent {
    /// Create an event from raw fields without validation
    pub const fn new(attempt: u16, status: u16) -> Self {
        Self { attempt, status }
    }

    /// Create an acknowledgement ping event
    pub const fn ack_ping() -> Self {
        Self {
            attempt: ACK_PING,
            status: 0,
        }
    }

    /// Create a validated status report
    ///
    /// Fails if `attempt` collides with one of the reserved tags.
    pub fn report(attempt: u16, status: StatusCode) -> Result<Self, WireError> {
        if attempt == ADDRESS_TAG || attempt == ACK_PING {
            return Err(WireError::ReservedAttempt(attempt));
        }
        Ok(Self {
            attempt,
            status: status.as_raw(),
        })
    }

    /// Split a raw word into attempt and status halves
    pub const fn from_word(word: u32) -> Self {
        Self {
            attempt: (word >> 16) as u16,
            status: (word & 0xFFFF) as u16,
        }
    }

    /// Pack into a single FIFO word
    pub const fn to_word(self) -> u32 {
        ((self.attempt as u32) << 16) | self.status as u32
    }

    /// Returns true if this is an acknowledgement ping
    pub fn is_ack_ping(&self) -> bool {
        self.attempt == ACK_PING
    }

    /// Status code, if the raw value is a known one
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_raw(self.status)
    }
}

/// Classification of a single inbound word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Inbound {
    /// Address notification header; the address follows in the next word
    AddressTag,
    /// Acknowledgement ping
    AckPing(StatusEvent),
    /// Valid status report
    Status(StatusEvent),
    /// Status out of range without a signal tag
    Malformed { attempt: u16, status: u16 },
}

/// Classify a raw inbound word
pub fn classify(word: u32) -> Inbound {
    let event = StatusEvent::from_word(word);
    match event.attempt {
        ADDRESS_TAG => Inbound::AddressTag,
        ACK_PING => Inbound::AckPing(event),
        _ if event.status > MAX_STATUS_CODE => Inbound::Malformed {
            attempt: event.attempt,
            status: event.status,
        },
        _ => Inbound::Status(event),
    }
}

/// Header word announcing an address notification
pub const fn address_header() -> u32 {
    (ADDRESS_TAG as u32) << 16
}

/// Encode an address notification as its two-word sequence
pub fn address_words(addr: Ipv4Addr) -> [u32; 2] {
    [address_header(), u32::from(addr)]
}

/// Decode the payload word of an address notification
pub fn address_from_word(word: u32) -> Ipv4Addr {
    Ipv4Addr::from(word)
}
