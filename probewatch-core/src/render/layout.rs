//! Screen regions in pixels
//!
//! Every redraw region maps to one fixed rectangle so partial updates can
//! clear exactly what they repaint.

use probewatch_display::{Rect, GLYPH_HEIGHT};

use crate::config::MAX_CHANNELS;

/// Height of the title bar
pub const TITLE_HEIGHT: u16 = 12;

/// Height of the statistics block in Graph mode (two text lines)
pub const GRAPH_INFO_HEIGHT: u16 = 2 * GLYPH_HEIGHT + 4;

/// Region geometry for a display of a given size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    width: u16,
    height: u16,
}

impl Layout {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Title bar across the top
    pub fn title(&self) -> Rect {
        Rect::new(0, 0, self.width, TITLE_HEIGHT.min(self.height))
    }

    /// Everything below the title bar
    pub fn body(&self) -> Rect {
        let top = TITLE_HEIGHT.min(self.height);
        Rect::new(0, top, self.width, self.height - top)
    }

    /// Row `index` of the overview list
    ///
    /// The body is split into `MAX_CHANNELS` equal rows.
    pub fn overview_row(&self, index: usize) -> Rect {
        let body = self.body();
        let row_height = body.height / MAX_CHANNELS as u16;
        let index = index.min(MAX_CHANNELS - 1) as u16;
        Rect::new(0, body.y + index * row_height, self.width, row_height)
    }

    /// Large value and alarm status in Detail mode
    pub fn detail_value(&self) -> Rect {
        self.body()
    }

    /// Min/max/avg/current labels in Graph mode
    pub fn graph_info(&self) -> Rect {
        let body = self.body();
        Rect::new(0, body.y, self.width, GRAPH_INFO_HEIGHT.min(body.height))
    }

    /// History curve in Graph mode
    pub fn graph_curve(&self) -> Rect {
        let body = self.body();
        let info = self.graph_info();
        Rect::new(0, info.bottom(), self.width, body.bottom() - info.bottom())
    }
}
