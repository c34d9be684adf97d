//! Board-agnostic core logic for the status link firmware
//!
//! This crate contains all presentation-core logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (FIFO, display, indicator, messaging client, clock)
//! - Bounded event queue
//! - Inter-core transport (consumer drain, producer reporter)
//! - Status reducer and presenter
//! - Messaging client lifecycle and keep-alive scheduling
//! - Main loop step
//! - Configuration types and parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod lifecycle;
pub mod messaging;
pub mod presenter;
pub mod queue;
pub mod reducer;
pub mod runner;
pub mod traits;
pub mod transport;

pub use context::StatusContext;
pub use diagnostics::{Diagnostic, DiagnosticCounters};
pub use queue::{EventQueue, QueueFull};
pub use runner::{StatusLoop, StepReport};
