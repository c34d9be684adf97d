//! Embassy async tasks
//!
//! One task per core. They only talk to each other through the SIO FIFO.

pub mod status;
pub mod uplink;

pub use status::status_task;
pub use uplink::uplink_task;
