//! Pixel geometry and colour types shared by all backends

/// Glyph cell width at text size 1 (5x7 font plus spacing)
pub const GLYPH_WIDTH: u16 = 6;

/// Glyph cell height at text size 1
pub const GLYPH_HEIGHT: u16 = 8;

/// A pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// First column past the right edge
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// First row past the bottom edge
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Shrink by `margin` pixels on every side
    pub fn inset(&self, margin: u16) -> Self {
        let w = self.width.saturating_sub(margin * 2);
        let h = self.height.saturating_sub(margin * 2);
        Self::new(self.x + margin.min(self.width / 2), self.y + margin.min(self.height / 2), w, h)
    }

    /// Offset a point given relative to this rectangle's origin
    pub fn at(&self, dx: u16, dy: u16) -> Point {
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// RGB565 colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
    pub const CYAN: Color = Color(0x07FF);
    pub const YELLOW: Color = Color(0xFFE0);
    pub const GRAY: Color = Color(0x8410);

    /// Pack 8-bit channels into RGB565
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Foreground, background and scale for a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    pub fg: Color,
    pub bg: Color,
    pub size: u8,
}

impl TextStyle {
    pub const fn new(fg: Color, bg: Color, size: u8) -> Self {
        Self { fg, bg, size }
    }

    /// Pixel width of `chars` glyphs in this style
    pub const fn width_of(&self, chars: usize) -> u16 {
        GLYPH_WIDTH * self.size as u16 * chars as u16
    }

    /// Pixel height of one line in this style
    pub const fn line_height(&self) -> u16 {
        GLYPH_HEIGHT * self.size as u16
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(Color::WHITE, Color::BLACK, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_packing() {
        assert_eq!(Color::rgb(255, 0, 0), Color::RED);
        assert_eq!(Color::rgb(0, 255, 0), Color::GREEN);
        assert_eq!(Color::rgb(0, 0, 255), Color::BLUE);
        assert_eq!(Color::rgb(255, 255, 255), Color::WHITE);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 20, 30, 5);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 25);
        assert!(r.contains(Point::new(10, 20)));
        assert!(!r.contains(Point::new(40, 20)));
        assert!(!r.contains(Point::new(10, 25)));
    }

    #[test]
    fn test_inset_never_underflows() {
        let r = Rect::new(0, 0, 3, 3).inset(4);
        assert!(r.is_empty());
        assert_eq!(Rect::new(0, 0, 20, 10).inset(2), Rect::new(2, 2, 16, 6));
    }

    #[test]
    fn test_text_metrics() {
        let style = TextStyle::new(Color::WHITE, Color::BLACK, 2);
        assert_eq!(style.width_of(4), 48);
        assert_eq!(style.line_height(), 16);
    }
}
