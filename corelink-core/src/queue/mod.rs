//! Bounded event queue
//!
//! Fixed-capacity ring buffer carrying status events from the transport
//! to the reducer. Both ends run in the same execution context.

pub mod ring;

pub use ring::{EventQueue, QueueFull, QUEUE_CAPACITY};
