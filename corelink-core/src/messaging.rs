//! Messaging client that forwards requests to the network core
//!
//! The broker connection itself lives on the network core. This client
//! only frames [`UplinkCommand`]s onto the outgoing FIFO.

use corelink_protocol::{CommandError, UplinkCommand, MAX_COMMAND_WORDS};

use crate::traits::{FifoTx, MessagingClient, MessagingError};

/// [`MessagingClient`] over the transmit side of the inter-core FIFO
pub struct FifoMessagingClient<T> {
    tx: T,
    started: bool,
}

impl<T: FifoTx> FifoMessagingClient<T> {
    pub fn new(tx: T) -> Self {
        Self { tx, started: false }
    }

    fn send(&mut self, command: &UplinkCommand) -> Result<(), MessagingError> {
        let mut frame = [0u32; MAX_COMMAND_WORDS];
        let len = command.encode(&mut frame).map_err(MessagingError::from)?;
        for &word in &frame[..len] {
            self.tx.push_blocking(word);
        }
        Ok(())
    }
}

impl From<CommandError> for MessagingError {
    fn from(e: CommandError) -> Self {
        match e {
            CommandError::PayloadTooLarge => MessagingError::PayloadTooLarge,
            _ => MessagingError::Uplink,
        }
    }
}

impl<T: FifoTx> MessagingClient for FifoMessagingClient<T> {
    fn start(&mut self) -> Result<(), MessagingError> {
        self.send(&UplinkCommand::StartClient)?;
        self.started = true;
        Ok(())
    }

    fn publish(&mut self, payload: &str) -> Result<(), MessagingError> {
        if !self.started {
            return Err(MessagingError::NotStarted);
        }
        let command = UplinkCommand::publish(payload)?;
        self.send(&command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelink_protocol::{CommandParser, COMMAND_TAG};
    use heapless::Vec;

    #[derive(Default)]
    struct WordSink {
        words: Vec<u32, 64>,
    }

    impl FifoTx for WordSink {
        fn push_blocking(&mut self, word: u32) {
            self.words.push(word).unwrap();
        }
    }

    #[test]
    fn test_publish_before_start_refused() {
        let mut client = FifoMessagingClient::new(WordSink::default());
        assert_eq!(client.publish("PING"), Err(MessagingError::NotStarted));
        assert!(client.tx.words.is_empty());
    }

    #[test]
    fn test_frames_reach_parser() {
        let mut client = FifoMessagingClient::new(WordSink::default());
        client.start().unwrap();
        client.publish("PING").unwrap();

        assert_eq!((client.tx.words[0] >> 16) as u16, COMMAND_TAG);

        let mut parser = CommandParser::new();
        let commands: Vec<UplinkCommand, 4> = client
            .tx
            .words
            .iter()
            .filter_map(|&w| parser.feed(w).unwrap())
            .collect();
        assert_eq!(
            commands.as_slice(),
            &[
                UplinkCommand::StartClient,
                UplinkCommand::publish("PING").unwrap()
            ]
        );
    }

    #[test]
    fn test_oversize_payload() {
        let mut client = FifoMessagingClient::new(WordSink::default());
        client.start().unwrap();
        let before = client.tx.words.len();
        let long = core::str::from_utf8(&[b'x'; 65]).unwrap();
        assert_eq!(client.publish(long), Err(MessagingError::PayloadTooLarge));
        assert_eq!(client.tx.words.len(), before);
    }
}
