//! Build script for probewatch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates monitor.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted per section, with their expected kind
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "probes",
        &[("max_channels", Kind::Integer), ("history_capacity", Kind::Integer)],
    ),
    (
        "sampling",
        &[
            ("poll_interval_ms", Kind::Integer),
            ("settle_ms", Kind::Integer),
            ("store_interval_ms", Kind::Integer),
        ],
    ),
    (
        "alarm",
        &[
            ("high_c", Kind::Float),
            ("low_c", Kind::Float),
            ("blink_interval_ms", Kind::Integer),
        ],
    ),
    (
        "display",
        &[("tolerance_c", Kind::Float), ("loop_interval_ms", Kind::Integer)],
    ),
    ("host", &[("timeout_ms", Kind::Integer)]),
];

/// Upper bounds shared with probewatch-core
const MAX_CHANNELS: i64 = 8;
const MAX_HISTORY: i64 = 120;

#[derive(Clone, Copy)]
enum Kind {
    Integer,
    Float,
}

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate monitor.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=monitor.toml");

    let config_path = Path::new("monitor.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: monitor.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds monitor.toml at build time.                 ║\n\
            ║  Please create one in the probewatch-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read monitor.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in monitor.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_schema(&config, &mut errors);
    if errors.is_empty() {
        validate_ranges(&config, &mut errors);
    }
    report("Invalid monitor configuration", &errors);

    println!("cargo:warning=monitor.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with a boxed list of errors, if any
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Every section and key must be known and of the right type
///
/// Mirrors the firmware parser, which rejects unknown keys at runtime.
fn validate_schema(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (section, body) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(body) = body.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in body {
            let Some((_, kind)) = keys.iter().find(|(name, _)| *name == key.as_str()) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };
            let ok = match kind {
                Kind::Integer => matches!(value, toml::Value::Integer(v) if *v >= 0),
                Kind::Float => matches!(value, toml::Value::Float(_) | toml::Value::Integer(_)),
            };
            if !ok {
                errors.push(format!("[{}] '{}' has the wrong type", section, key));
            }
        }
    }
}

/// Cross-field checks mirroring `MonitorConfig::validate`
fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    let int = |section: &str, key: &str, default: i64| {
        config
            .get(section)
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_integer())
            .unwrap_or(default)
    };
    let float = |section: &str, key: &str, default: f64| {
        config
            .get(section)
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
            .unwrap_or(default)
    };

    let channels = int("probes", "max_channels", MAX_CHANNELS);
    if channels > MAX_CHANNELS {
        errors.push(format!("max_channels must be at most {}", MAX_CHANNELS));
    }
    let capacity = int("probes", "history_capacity", MAX_HISTORY);
    if capacity == 0 || capacity > MAX_HISTORY {
        errors.push(format!("history_capacity must be 1-{}", MAX_HISTORY));
    }

    let poll = int("sampling", "poll_interval_ms", 1000);
    let settle = int("sampling", "settle_ms", 750);
    if poll == 0 {
        errors.push("poll_interval_ms must be non-zero".to_string());
    }
    if settle >= poll {
        errors.push("settle_ms must be shorter than poll_interval_ms".to_string());
    }

    let high = float("alarm", "high_c", 30.0);
    let low = float("alarm", "low_c", 10.0);
    if low >= high {
        errors.push("alarm low_c must be below high_c".to_string());
    }
    if int("alarm", "blink_interval_ms", 500) == 0 {
        errors.push("blink_interval_ms must be non-zero".to_string());
    }

    if float("display", "tolerance_c", 0.1) < 0.0 {
        errors.push("tolerance_c must not be negative".to_string());
    }
    if int("display", "loop_interval_ms", 50) == 0 {
        errors.push("loop_interval_ms must be non-zero".to_string());
    }
    if int("host", "timeout_ms", 10_000) == 0 {
        errors.push("host timeout_ms must be non-zero".to_string());
    }
}
