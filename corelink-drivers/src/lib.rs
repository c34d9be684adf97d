//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in corelink-core:
//!
//! - Status display (SSD1306 128x64 OLED over I2C)
//! - RGB indicator (three PWM channels)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod indicator;
