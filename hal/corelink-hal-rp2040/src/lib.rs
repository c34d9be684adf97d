//! RP2040-specific HAL for the status link firmware
//!
//! This crate binds the corelink-core collaborator traits to RP2040
//! hardware:
//!
//! - SIO inter-core FIFO (implements `InterCoreFifo` and `FifoTx`)
//! - Board pin map and peripheral setup for the OLED and RGB LED
//! - Monotonic clock over `embassy-time`

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod clock;
pub mod fifo;

pub use clock::EmbassyClock;
pub use fifo::SioFifo;
