//! Simple TOML parser for the link configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the link configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! Unknown sections and keys are ignored so that newer config files still
//! load on older firmware.

use core::net::Ipv4Addr;

use super::types::LinkConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// String value longer than its field allows
    ValueTooLong,
    /// Address is not a dotted quad
    InvalidAddress,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Messaging,
    Presentation,
    Indicator,
    Bench,
    Other,
}

/// Parse TOML text into a [`LinkConfig`]
///
/// Keys that are absent keep their default values.
pub fn parse_config(input: &str) -> Result<LinkConfig, ParseError> {
    let mut config = LinkConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let header = line
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?
        .trim();

    Ok(match header {
        "messaging" => Section::Messaging,
        "presentation" => Section::Presentation,
        "indicator" => Section::Indicator,
        "bench" => Section::Bench,
        "" => return Err(ParseError::InvalidSection),
        _ => Section::Other,
    })
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseError::InvalidValue)
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    // TOML allows underscores as digit separators
    let mut digits = heapless::String::<24>::new();
    for ch in value.chars().filter(|&c| c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_address(value: &str) -> Result<Ipv4Addr, ParseError> {
    parse_string(value)?
        .parse()
        .map_err(|_| ParseError::InvalidAddress)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut LinkConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Messaging, "keepalive_interval_ms") => {
            config.messaging.keepalive_interval_ms = parse_int(value)?;
        }
        (Section::Messaging, "keepalive_payload") => {
            let payload = parse_string(value)?;
            config.messaging.keepalive_payload.clear();
            config
                .messaging
                .keepalive_payload
                .push_str(payload)
                .map_err(|_| ParseError::ValueTooLong)?;
        }
        (Section::Presentation, "poll_interval_ms") => {
            config.presentation.poll_interval_ms = parse_int(value)?;
        }
        (Section::Presentation, "status_dwell_ms") => {
            config.presentation.status_dwell_ms = parse_int(value)?;
        }
        (Section::Presentation, "diagnostic_dwell_ms") => {
            config.presentation.diagnostic_dwell_ms = parse_int(value)?;
        }
        (Section::Presentation, "ack_hold_ms") => {
            config.presentation.ack_hold_ms = parse_int(value)?;
        }
        (Section::Presentation, "boot_banner_ms") => {
            config.presentation.boot_banner_ms = parse_int(value)?;
        }
        (Section::Indicator, "status_level") => {
            config.indicator.status_level = parse_int(value)?;
        }
        (Section::Bench, "address") => {
            config.bench.address = parse_address(value)?;
        }
        (Section::Bench, "connect_delay_ms") => {
            config.bench.connect_delay_ms = parse_int(value)?;
        }
        _ => {}
    }
    Ok(())
}
