//! Inter-core transport
//!
//! - [`consumer`]: presentation-core side, turns FIFO words into queued
//!   events and out-of-band notifications
//! - [`producer`]: network-core side, encodes reports and reads commands

pub mod consumer;
pub mod producer;

pub use consumer::{drain_transport, TransportEvent};
pub use producer::{CommandReader, StatusReporter};
