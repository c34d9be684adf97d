//! Inter-core FIFO protocol
//!
//! This crate defines the word vocabulary spoken over the RP2040 SIO FIFOs
//! between the network core (core 1) and the presentation core (core 0).
//! Every transfer is a single 32-bit word, so the protocol multiplexes
//! reserved sentinel values onto the same integer range as real data.
//!
//! # Inbound (core 1 → core 0)
//!
//! ```text
//! ┌──────────────────────┬─────────────────────┐
//! │ ATTEMPT (bits 31-16) │ STATUS (bits 15-0)  │
//! └──────────────────────┴─────────────────────┘
//!   0xFFFE  → next word is an IPv4 address (network byte order)
//!   0x9999  → acknowledgement ping, status ignored
//!   other   → status report, status must be 0, 1 or 2
//! ```
//!
//! # Outbound (core 0 → core 1)
//!
//! ```text
//! ┌────────────────┬────────────┬──────────┬──────────────────────┐
//! │ TAG 0xC0DE     │ OPCODE     │ LENGTH   │ PAYLOAD WORDS        │
//! │ bits 31-16     │ bits 15-8  │ bits 7-0 │ ceil(LENGTH/4) words │
//! └────────────────┴────────────┴──────────┴──────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod wire;

pub use command::{
    CommandError, CommandParser, UplinkCommand, COMMAND_TAG, MAX_COMMAND_PAYLOAD,
    MAX_COMMAND_WORDS,
};
pub use wire::{
    address_from_word, address_header, address_words, classify, Inbound, StatusCode,
    StatusEvent, WireError, ACK_PING, ADDRESS_TAG, MAX_STATUS_CODE,
};
