//! Non-fatal diagnostics
//!
//! Nothing on the presentation core is fatal: rejected events are dropped
//! and counted, collaborator faults are counted, and the loop carries on.

use corelink_protocol::StatusEvent;

/// A dropped inbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Diagnostic {
    /// Status out of range without a signal tag
    MalformedEvent { attempt: u16, status: u16 },
    /// Event queue full, event discarded
    QueueFull { event: StatusEvent },
}

impl Diagnostic {
    /// Short message shown on the display
    pub fn message(&self) -> &'static str {
        match self {
            Diagnostic::MalformedEvent { .. } => "Invalid status.",
            Diagnostic::QueueFull { .. } => "Queue full. Dropped.",
        }
    }
}

/// Running totals of everything that was dropped or failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiagnosticCounters {
    /// Malformed status words rejected
    pub malformed: u32,
    /// Events dropped because the queue was full
    pub queue_full: u32,
    /// Display operations that failed
    pub display_faults: u32,
    /// Indicator operations that failed
    pub indicator_faults: u32,
    /// Messaging client start or publish failures
    pub messaging_faults: u32,
}

impl DiagnosticCounters {
    /// Record a dropped event
    pub fn record(&mut self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::MalformedEvent { .. } => {
                self.malformed = self.malformed.saturating_add(1);
            }
            Diagnostic::QueueFull { .. } => {
                self.queue_full = self.queue_full.saturating_add(1);
            }
        }
    }

    /// Total number of dropped inbound events
    pub fn dropped(&self) -> u32 {
        self.malformed.saturating_add(self.queue_full)
    }
}
