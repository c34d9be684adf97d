//! SIO inter-core FIFO
//!
//! Each core sees its own pair of FIFOs through the same SIO registers:
//! reads pop words written by the other core, writes push words to it.
//! The FIFOs are 8 words deep in each direction.
//!
//! Waiting is done with `wfe`; every push is followed by `sev` so the
//! other core wakes up.

use corelink_core::traits::{FifoTx, InterCoreFifo};
use embassy_rp::pac;

/// Handle to the calling core's side of the SIO FIFO
///
/// The handle is zero-sized. Keep at most one reader and one writer per
/// core; two readers would split the word stream between them.
#[derive(Debug)]
pub struct SioFifo {
    _private: (),
}

impl SioFifo {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Returns true if the FIFO towards the other core has space
    pub fn ready(&self) -> bool {
        pac::SIO.fifo().st().read().rdy()
    }
}

impl Default for SioFifo {
    fn default() -> Self {
        Self::new()
    }
}

impl InterCoreFifo for SioFifo {
    fn has_data(&mut self) -> bool {
        pac::SIO.fifo().st().read().vld()
    }

    fn pop_blocking(&mut self) -> u32 {
        while !self.has_data() {
            cortex_m::asm::wfe();
        }
        pac::SIO.fifo().rd().read()
    }
}

impl FifoTx for SioFifo {
    fn push_blocking(&mut self, word: u32) {
        while !self.ready() {
            cortex_m::asm::wfe();
        }
        pac::SIO.fifo().wr().write_value(word);
        cortex_m::asm::sev();
    }
}
