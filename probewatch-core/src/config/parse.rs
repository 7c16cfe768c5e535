//! Minimal TOML parser for the monitor configuration
//!
//! Handles only the subset used by `monitor.toml`. It does NOT support
//! the full TOML spec.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (integer, float)
//! - Comments (`# ...`), whole-line or trailing
//!
//! Keys that are not set keep their default value. Unknown sections and
//! keys are rejected so typos do not silently fall back to defaults.

use super::types::{ConfigError, MonitorConfig};

/// What went wrong while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Malformed section header or line without `=`
    Syntax,
    /// Section name not recognised
    UnknownSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Parsed configuration failed validation
    Invalid(ConfigError),
}

/// Parse error with the 1-based line it occurred on
///
/// Validation failures are reported with line 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: u16,
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn at(line: usize, kind: ParseErrorKind) -> Self {
        Self {
            line: u16::try_from(line).unwrap_or(u16::MAX),
            kind,
        }
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Probes,
    Sampling,
    Alarm,
    Display,
    Host,
}

/// Parse TOML configuration into a validated `MonitorConfig`
pub fn parse_config(input: &str) -> Result<MonitorConfig, ParseError> {
    let mut config = MonitorConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::at(line_no, ParseErrorKind::Syntax));
            }
            section = parse_section_header(&line[1..line.len() - 1])
                .map_err(|kind| ParseError::at(line_no, kind))?;
            continue;
        }

        let (key, value) =
            parse_key_value(line).ok_or(ParseError::at(line_no, ParseErrorKind::Syntax))?;
        apply_value(section, key, value, &mut config)
            .map_err(|kind| ParseError::at(line_no, kind))?;
    }

    config
        .validate()
        .map_err(|e| ParseError::at(0, ParseErrorKind::Invalid(e)))?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseErrorKind> {
    match header.trim() {
        "probes" => Ok(Section::Probes),
        "sampling" => Ok(Section::Sampling),
        "alarm" => Ok(Section::Alarm),
        "display" => Ok(Section::Display),
        "host" => Ok(Section::Host),
        "" => Err(ParseErrorKind::Syntax),
        _ => Err(ParseErrorKind::UnknownSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseErrorKind> {
    // TOML allows underscores as digit separators
    let mut digits = heapless::String::<16>::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseErrorKind::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseErrorKind::InvalidValue)
}

fn parse_float(value: &str) -> Result<f32, ParseErrorKind> {
    let v: f32 = value.parse().map_err(|_| ParseErrorKind::InvalidValue)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseErrorKind::InvalidValue)
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MonitorConfig,
) -> Result<(), ParseErrorKind> {
    match (section, key) {
        (Section::Probes, "max_channels") => config.max_channels = parse_int(value)?,
        (Section::Probes, "history_capacity") => config.history_capacity = parse_int(value)?,

        (Section::Sampling, "poll_interval_ms") => config.poll_interval_ms = parse_int(value)?,
        (Section::Sampling, "settle_ms") => config.settle_ms = parse_int(value)?,
        (Section::Sampling, "store_interval_ms") => config.store_interval_ms = parse_int(value)?,

        (Section::Alarm, "high_c") => config.thresholds.high_c = parse_float(value)?,
        (Section::Alarm, "low_c") => config.thresholds.low_c = parse_float(value)?,
        (Section::Alarm, "blink_interval_ms") => config.blink_interval_ms = parse_int(value)?,

        (Section::Display, "tolerance_c") => config.tolerance_c = parse_float(value)?,
        (Section::Display, "loop_interval_ms") => config.loop_interval_ms = parse_int(value)?,

        (Section::Host, "timeout_ms") => config.host_timeout_ms = parse_int(value)?,

        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}
