//! Presentation-core state
//!
//! Everything the transport and the reducer share lives here and is passed
//! by `&mut` into each step. The presentation core is the only writer of
//! every field.

use core::net::Ipv4Addr;

use crate::diagnostics::DiagnosticCounters;
use crate::lifecycle::MessagingLifecycle;
use crate::queue::{EventQueue, QUEUE_CAPACITY};

/// Shared state of the presentation core
#[derive(Debug, Clone)]
pub struct StatusContext<const N: usize = QUEUE_CAPACITY> {
    /// Events waiting for the reducer
    pub queue: EventQueue<N>,
    /// Last address reported by the network core (0 = none yet)
    pub last_known_address: u32,
    /// Set once any address notification has been received
    pub address_available: bool,
    /// Messaging client lifecycle
    pub lifecycle: MessagingLifecycle,
    /// Dropped events and collaborator faults
    pub diagnostics: DiagnosticCounters,
}

impl<const N: usize> Default for StatusContext<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> StatusContext<N> {
    /// Create a fresh context
    pub const fn new() -> Self {
        Self {
            queue: EventQueue::new(),
            last_known_address: 0,
            address_available: false,
            lifecycle: MessagingLifecycle::new(),
            diagnostics: DiagnosticCounters {
                malformed: 0,
                queue_full: 0,
                display_faults: 0,
                indicator_faults: 0,
                messaging_faults: 0,
            },
        }
    }

    /// Record an address notification
    pub fn set_address(&mut self, addr: Ipv4Addr) {
        self.last_known_address = u32::from(addr);
        self.address_available = true;
    }

    /// Last known address, if a non-zero one has been reported
    pub fn address(&self) -> Option<Ipv4Addr> {
        match self.last_known_address {
            0 => None,
            raw => Some(Ipv4Addr::from(raw)),
        }
    }
}
