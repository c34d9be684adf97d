//! Network-core side of the transport
//!
//! The network core reports association progress through a
//! [`StatusReporter`] and receives messaging commands through a
//! [`CommandReader`].

use core::net::Ipv4Addr;

use corelink_protocol::{
    address_words, CommandError, CommandParser, StatusCode, StatusEvent, UplinkCommand, WireError,
};

use crate::traits::{FifoTx, InterCoreFifo};

/// Encodes status reports onto the outgoing FIFO
pub struct StatusReporter<T> {
    tx: T,
}

impl<T: FifoTx> StatusReporter<T> {
    /// Wrap the transmit side of a FIFO
    pub fn new(tx: T) -> Self {
        Self { tx }
    }

    /// Report a status change for the given attempt
    pub fn report(&mut self, attempt: u16, status: StatusCode) -> Result<(), WireError> {
        let event = StatusEvent::report(attempt, status)?;
        self.tx.push_blocking(event.to_word());
        Ok(())
    }

    /// Report an acquired address (two words, tag first)
    pub fn report_address(&mut self, addr: Ipv4Addr) {
        for word in address_words(addr) {
            self.tx.push_blocking(word);
        }
    }

    /// Send an acknowledgement ping
    pub fn acknowledge_ping(&mut self) {
        self.tx.push_blocking(StatusEvent::ack_ping().to_word());
    }
}

/// Reassembles commands from the incoming FIFO
pub struct CommandReader<F> {
    rx: F,
    parser: CommandParser,
}

impl<F: InterCoreFifo> CommandReader<F> {
    /// Wrap the receive side of a FIFO
    pub fn new(rx: F) -> Self {
        Self {
            rx,
            parser: CommandParser::new(),
        }
    }

    /// Consume pending words until a command completes or the FIFO runs dry
    ///
    /// Never blocks: a partially received command is kept in the parser
    /// until the next poll.
    pub fn poll(&mut self) -> Result<Option<UplinkCommand>, CommandError> {
        while self.rx.has_data() {
            let word = self.rx.pop_blocking();
            if let Some(command) = self.parser.feed(word)? {
                return Ok(Some(command));
            }
        }
        Ok(None)
    }
}
