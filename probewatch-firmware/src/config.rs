//! Embedded monitor configuration
//!
//! `monitor.toml` is compiled into the image and checked by build.rs, so a
//! runtime parse failure means the two parsers disagree. The firmware then
//! keeps running on the built-in defaults.

use defmt::*;
use probewatch_core::config::{parse_config, MonitorConfig};

/// Embedded configuration (compiled into firmware)
/// Edit monitor.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../monitor.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> MonitorConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: {} channels, {} samples, poll {}ms, store {}ms",
                config.max_channels,
                config.history_capacity,
                config.poll_interval_ms,
                config.store_interval_ms
            );
            info!(
                "Alarms: high {}C, low {}C",
                config.thresholds.high_c, config.thresholds.low_c
            );
            config
        }
        Err(e) => {
            error!("monitor.toml line {}: {:?}", e.line, e.kind);
            error!("Using built-in defaults");
            MonitorConfig::default()
        }
    }
}
