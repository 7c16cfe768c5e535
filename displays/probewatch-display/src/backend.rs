//! Display backend trait
//!
//! Defines the drawing surface the controller renders onto. Implementations
//! may drive a panel directly or forward commands to a remote display module.

use crate::geometry::{Color, Point, Rect, TextStyle};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Command did not fit the outgoing buffer
    BufferOverflow,
}

/// Display backend trait
///
/// Provides a hardware-agnostic pixel interface. Coordinates are in pixels
/// with the origin at the top-left corner.
pub trait DisplayBackend {
    /// Fill the entire display with `color`
    ///
    /// Only used for full redraws; partial updates clear their own region.
    fn clear(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Fill a rectangle with `color`
    fn clear_region(&mut self, region: Rect, color: Color) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at `at`
    fn draw_text(&mut self, at: Point, text: &str, style: TextStyle) -> Result<(), DisplayError>;

    /// Draw a one-pixel line between two points
    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<(), DisplayError>;

    /// Set a single pixel
    fn draw_point(&mut self, at: Point, color: Color) -> Result<(), DisplayError>;

    /// Get the display dimensions as (width, height) in pixels
    fn dimensions(&self) -> (u16, u16);

    /// Bounds of the whole display
    fn bounds(&self) -> Rect {
        let (width, height) = self.dimensions();
        Rect::new(0, 0, width, height)
    }
}
