//! Collaborator traits
//!
//! These traits define the interface between the presentation logic
//! and hardware-specific implementations.

pub mod clock;
pub mod display;
pub mod fifo;
pub mod indicator;
pub mod messaging;

pub use clock::Clock;
pub use display::{DisplayError, StatusDisplay, StatusDisplayExt};
pub use fifo::{FifoTx, InterCoreFifo};
pub use indicator::{Indicator, IndicatorError, Rgb};
pub use messaging::{MessagingClient, MessagingError};
