//! Configuration loading
//!
//! The link configuration is compiled into the firmware from `link.toml`
//! and parsed at boot by the corelink-core parser. `build.rs` has already
//! validated the file, so falling back to defaults here only happens when
//! the two parsers disagree.

use defmt::*;

use corelink_core::config::{parse_config, LinkConfig};

/// Embedded configuration (compiled into firmware)
/// Edit link.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../link.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn load_config() -> LinkConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using built-in defaults");
            LinkConfig::default()
        }
    }
}
