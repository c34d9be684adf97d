//! Build script for corelink-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates link.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

/// Longest keep-alive payload the firmware can hold
const MAX_PAYLOAD_LEN: usize = 32;

/// Known sections and their keys
const SECTIONS: &[(&str, &[&str])] = &[
    ("messaging", &["keepalive_interval_ms", "keepalive_payload"]),
    (
        "presentation",
        &[
            "poll_interval_ms",
            "status_dwell_ms",
            "diagnostic_dwell_ms",
            "ack_hold_ms",
            "boot_banner_ms",
        ],
    ),
    ("indicator", &["status_level"]),
    ("bench", &["address", "connect_delay_ms"]),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate link.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=link.toml");

    let config_path = Path::new("link.toml");

    if !config_path.exists() {
        fail(
            "link.toml not found!",
            &["The firmware embeds link.toml from the corelink-firmware directory.".to_string()],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read link.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in link.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    warn_unknown_keys(&config);
    validate_messaging(&config, &mut errors);
    validate_presentation(&config, &mut errors);
    validate_indicator(&config, &mut errors);
    validate_bench(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in link.toml", &errors);
    }

    println!("cargo:warning=link.toml validated successfully");
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// The firmware parser ignores unknown keys, so only warn about them
fn warn_unknown_keys(config: &toml::Value) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (section, value) in root {
        let Some((_, keys)) = SECTIONS.iter().find(|(name, _)| *name == section.as_str()) else {
            println!("cargo:warning=link.toml: unknown section [{}] is ignored", section);
            continue;
        };
        if let Some(table) = value.as_table() {
            for key in table.keys() {
                if !keys.contains(&key.as_str()) {
                    println!(
                        "cargo:warning=link.toml: unknown key '{}' in [{}] is ignored",
                        key, section
                    );
                }
            }
        }
    }
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::Table> {
    config.get(name).and_then(|v| v.as_table())
}

/// Check an optional integer key against an inclusive range
fn check_int(
    table: &toml::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn validate_messaging(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = section(config, "messaging") else {
        return;
    };

    check_int(table, "messaging", "keepalive_interval_ms", 1, u32::MAX as i64, errors);

    match table.get("keepalive_payload") {
        None => {}
        Some(toml::Value::String(s)) if s.is_empty() => {
            errors.push("[messaging] keepalive_payload cannot be empty".to_string());
        }
        Some(toml::Value::String(s)) if s.len() > MAX_PAYLOAD_LEN => {
            errors.push(format!(
                "[messaging] keepalive_payload longer than {} bytes",
                MAX_PAYLOAD_LEN
            ));
        }
        Some(toml::Value::String(s)) if s.contains('"') => {
            errors.push("[messaging] keepalive_payload cannot contain quotes".to_string());
        }
        Some(toml::Value::String(_)) => {}
        Some(_) => errors.push("[messaging] keepalive_payload must be a string".to_string()),
    }
}

fn validate_presentation(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = section(config, "presentation") else {
        return;
    };

    check_int(table, "presentation", "poll_interval_ms", 1, 60_000, errors);
    for key in [
        "status_dwell_ms",
        "diagnostic_dwell_ms",
        "ack_hold_ms",
        "boot_banner_ms",
    ] {
        check_int(table, "presentation", key, 0, 600_000, errors);
    }
}

fn validate_indicator(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = section(config, "indicator") else {
        return;
    };

    check_int(table, "indicator", "status_level", 0, u16::MAX as i64, errors);
}

fn validate_bench(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = section(config, "bench") else {
        return;
    };

    match table.get("address") {
        None => {}
        Some(toml::Value::String(s)) => match s.parse::<Ipv4Addr>() {
            Ok(addr) if addr.is_unspecified() => {
                errors.push("[bench] address 0.0.0.0 never starts the client".to_string());
            }
            Ok(_) => {}
            Err(_) => errors.push(format!("[bench] address '{}' is not a dotted quad", s)),
        },
        Some(_) => errors.push("[bench] address must be a string".to_string()),
    }

    check_int(table, "bench", "connect_delay_ms", 0, 600_000, errors);
}
