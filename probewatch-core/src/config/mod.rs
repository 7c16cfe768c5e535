//! Configuration types
//!
//! Board-agnostic monitor configuration and the parser for the
//! `monitor.toml` subset embedded in the firmware.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError, ParseErrorKind};
pub use types::*;
