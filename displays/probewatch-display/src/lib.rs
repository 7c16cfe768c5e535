//! Display abstraction for Probewatch
//!
//! This crate provides:
//! - `DisplayBackend` trait: a small pixel drawing surface
//! - Geometry and colour types (`Point`, `Rect`, `Color`, `TextStyle`)
//! - `FrameLink`, a backend that forwards drawing commands to the display
//!   module over the framed UART protocol
//!
//! # Architecture
//!
//! The controller never touches the panel itself. It renders through
//! `DisplayBackend`, and `FrameLink` turns each call into one
//! probewatch-protocol frame. Test doubles implement the same trait and
//! record the calls instead.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod geometry;
pub mod link;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use geometry::{Color, Point, Rect, TextStyle, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use link::{FrameLink, PANEL_HEIGHT, PANEL_WIDTH};
