//! Monotonic clock backed by the embassy time driver

use corelink_core::traits::Clock;
use embassy_time::Instant;

/// [`Clock`] over [`embassy_time::Instant`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
