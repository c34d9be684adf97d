//! Configuration types
//!
//! Board-agnostic link configuration, parsed from the TOML file embedded in
//! the firmware image.

pub mod parser;
pub mod types;

pub use parser::{parse_config, ParseError};
pub use types::*;
