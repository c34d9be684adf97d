//! Outbound command framing (presentation core → network core)
//!
//! Frame format, one header word followed by payload words:
//! - TAG (bits 31-16): 0xC0DE synchronization tag
//! - OPCODE (bits 15-8): command identifier
//! - LENGTH (bits 7-0): payload length in bytes (0-64)
//! - PAYLOAD: ceil(LENGTH / 4) words, bytes packed little-endian

use heapless::{String, Vec};

/// Header synchronization tag
pub const COMMAND_TAG: u16 = 0xC0DE;

/// Maximum payload size in bytes
pub const MAX_COMMAND_PAYLOAD: usize = 64;

/// Maximum complete frame size in words (header + payload)
pub const MAX_COMMAND_WORDS: usize = 1 + MAX_COMMAND_PAYLOAD / 4;

// Opcodes
const OP_START_CLIENT: u8 = 0x01;
const OP_PUBLISH: u8 = 0x02;

/// Errors that can occur during command encoding or parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Opcode not recognized
    UnknownOpcode(u8),
    /// Length field not valid for the opcode
    InvalidLength,
    /// Publish payload is not valid UTF-8
    InvalidUtf8,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Commands sent to the network core
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UplinkCommand {
    /// Start the messaging client
    StartClient,
    /// Publish a payload
    Publish(String<MAX_COMMAND_PAYLOAD>),
}

impl UplinkCommand {
    /// Create a publish command
    pub fn publish(payload: &str) -> Result<Self, CommandError> {
        let mut text = String::new();
        text.push_str(payload)
            .map_err(|_| CommandError::PayloadTooLarge)?;
        Ok(UplinkCommand::Publish(text))
    }

    /// Wire opcode
    pub fn opcode(&self) -> u8 {
        match self {
            UplinkCommand::StartClient => OP_START_CLIENT,
            UplinkCommand::Publish(_) => OP_PUBLISH,
        }
    }

    fn payload(&self) -> &[u8] {
        match self {
            UplinkCommand::StartClient => &[],
            UplinkCommand::Publish(text) => text.as_bytes(),
        }
    }

    /// Encode this command into a word buffer
    ///
    /// Returns the number of words written
    pub fn encode(&self, buffer: &mut [u32]) -> Result<usize, CommandError> {
        let payload = self.payload();
        let words = 1 + payload.len().div_ceil(4);
        if buffer.len() < words {
            return Err(CommandError::BufferTooSmall);
        }

        buffer[0] = header(self.opcode(), payload.len() as u8);
        for (slot, chunk) in buffer[1..words].iter_mut().zip(payload.chunks(4)) {
            let mut bytes = [0u8; 4];
            bytes[..chunk.len()].copy_from_slice(chunk);
            *slot = u32::from_le_bytes(bytes);
        }

        Ok(words)
    }

    /// Encode this command into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u32, MAX_COMMAND_WORDS>, CommandError> {
        let mut buffer = [0u32; MAX_COMMAND_WORDS];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| CommandError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// Build a header word
pub const fn header(opcode: u8, len: u8) -> u32 {
    ((COMMAND_TAG as u32) << 16) | ((opcode as u32) << 8) | len as u32
}

/// Returns true if the word carries the command tag
pub const fn is_header(word: u32) -> bool {
    (word >> 16) as u16 == COMMAND_TAG
}

/// State machine for reassembling commands from words
#[derive(Debug, Clone)]
pub struct CommandParser {
    state: ParseState,
    opcode: u8,
    expected_len: u8,
    buffer: Vec<u8, MAX_COMMAND_PAYLOAD>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for a header word
    WaitingForHeader,
    /// Reading payload words
    ReadingPayload,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    /// Create a new command parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForHeader,
            opcode: 0,
            expected_len: 0,
            buffer: Vec::new(),
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForHeader;
        self.opcode = 0;
        self.expected_len = 0;
        self.buffer.clear();
    }

    /// Feed a single word to the parser
    ///
    /// Returns `Ok(Some(command))` when a complete command is parsed,
    /// `Ok(None)` when more words are needed, or `Err` on a bad frame.
    pub fn feed(&mut self, word: u32) -> Result<Option<UplinkCommand>, CommandError> {
        match self.state {
            ParseState::WaitingForHeader => {
                // Silently ignore words until a header shows up
                if !is_header(word) {
                    return Ok(None);
                }

                let opcode = (word >> 8) as u8;
                let len = word as u8;

                if len as usize > MAX_COMMAND_PAYLOAD {
                    return Err(CommandError::PayloadTooLarge);
                }

                match opcode {
                    OP_START_CLIENT if len != 0 => Err(CommandError::InvalidLength),
                    OP_START_CLIENT => Ok(Some(UplinkCommand::StartClient)),
                    OP_PUBLISH if len == 0 => Ok(Some(UplinkCommand::Publish(String::new()))),
                    OP_PUBLISH => {
                        self.opcode = opcode;
                        self.expected_len = len;
                        self.buffer.clear();
                        self.state = ParseState::ReadingPayload;
                        Ok(None)
                    }
                    other => Err(CommandError::UnknownOpcode(other)),
                }
            }
            ParseState::ReadingPayload => {
                // 0xC0 never occurs in UTF-8, so a tagged word is always a
                // new header: drop the partial frame and start over
                if is_header(word) {
                    self.reset();
                    return self.feed(word);
                }

                let remaining = self.expected_len as usize - self.buffer.len();
                let bytes = word.to_le_bytes();
                // Cannot overflow: expected_len <= MAX_COMMAND_PAYLOAD
                let _ = self
                    .buffer
                    .extend_from_slice(&bytes[..remaining.min(4)]);

                if self.buffer.len() < self.expected_len as usize {
                    return Ok(None);
                }

                let result = self.finish();
                self.reset();
                result.map(Some)
            }
        }
    }

    /// Feed multiple words to the parser
    ///
    /// Returns the first complete command found, if any.
    /// Remaining words after a complete command are not consumed.
    pub fn feed_words(&mut self, words: &[u32]) -> Result<Option<UplinkCommand>, CommandError> {
        for &word in words {
            if let Some(command) = self.feed(word)? {
                return Ok(Some(command));
            }
        }
        Ok(None)
    }

    fn finish(&self) -> Result<UplinkCommand, CommandError> {
        match self.opcode {
            OP_PUBLISH => {
                let text =
                    core::str::from_utf8(&self.buffer).map_err(|_| CommandError::InvalidUtf8)?;
                UplinkCommand::publish(text)
            }
            other => Err(CommandError::UnknownOpcode(other)),
        }
    }
}
