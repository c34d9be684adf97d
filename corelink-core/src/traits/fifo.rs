//! Inter-core FIFO traits
//!
//! One direction per trait: the presentation core reads status words
//! through [`InterCoreFifo`] and writes command words through [`FifoTx`].

/// Receive side of a hardware FIFO
pub trait InterCoreFifo {
    /// Returns true if at least one word is waiting (never blocks)
    fn has_data(&mut self) -> bool;

    /// Pop one word, suspending the calling core until one is available
    fn pop_blocking(&mut self) -> u32;
}

/// Transmit side of a hardware FIFO
pub trait FifoTx {
    /// Push one word, waiting for space if the FIFO is full
    fn push_blocking(&mut self, word: u32);
}
