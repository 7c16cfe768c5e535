//! Display-link backend
//!
//! Implements [`DisplayBackend`] by encoding every drawing call as a
//! protocol frame and writing it to a byte sink (usually the UART that
//! connects the controller to the display module).

use crate::backend::{DisplayBackend, DisplayError};
use crate::geometry::{Color, Point, Rect, TextStyle};
use embedded_io::Write;
use probewatch_protocol::frame::MAX_FRAME_SIZE;
use probewatch_protocol::ControllerMessage;

/// Panel size of the display module (ST7735, landscape)
pub const PANEL_WIDTH: u16 = 160;
pub const PANEL_HEIGHT: u16 = 128;

/// Backend that forwards drawing commands over the display link
pub struct FrameLink<W> {
    writer: W,
    width: u16,
    height: u16,
    frames_sent: u32,
}

impl<W: Write> FrameLink<W> {
    /// Create a link for the default panel size
    pub fn new(writer: W) -> Self {
        Self::with_dimensions(writer, PANEL_WIDTH, PANEL_HEIGHT)
    }

    pub fn with_dimensions(writer: W, width: u16, height: u16) -> Self {
        Self {
            writer,
            width,
            height,
            frames_sent: 0,
        }
    }

    /// Number of frames written since creation
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    /// Access the underlying writer
    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume the link, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Send a heartbeat response to the display module
    pub fn send_pong(&mut self) -> Result<(), DisplayError> {
        self.send(&ControllerMessage::Pong)
    }

    fn send(&mut self, msg: &ControllerMessage<'_>) -> Result<(), DisplayError> {
        let frame = msg.to_frame().map_err(|_| DisplayError::BufferOverflow)?;
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = frame
            .encode(&mut buf)
            .map_err(|_| DisplayError::BufferOverflow)?;
        self.writer
            .write_all(&buf[..len])
            .map_err(|_| DisplayError::Communication)?;
        self.frames_sent = self.frames_sent.wrapping_add(1);
        Ok(())
    }

    fn check_point(&self, p: Point) -> Result<(), DisplayError> {
        if p.x >= self.width || p.y >= self.height {
            return Err(DisplayError::InvalidCoordinates);
        }
        Ok(())
    }
}

impl<W: Write> DisplayBackend for FrameLink<W> {
    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        self.send(&ControllerMessage::Clear { color: color.raw() })
    }

    fn clear_region(&mut self, region: Rect, color: Color) -> Result<(), DisplayError> {
        if region.right() > self.width || region.bottom() > self.height {
            return Err(DisplayError::InvalidCoordinates);
        }
        if region.is_empty() {
            return Ok(());
        }
        self.send(&ControllerMessage::ClearRegion {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
            color: color.raw(),
        })
    }

    fn draw_text(&mut self, at: Point, text: &str, style: TextStyle) -> Result<(), DisplayError> {
        self.check_point(at)?;
        if text.is_empty() {
            return Ok(());
        }
        self.send(&ControllerMessage::Text {
            x: at.x,
            y: at.y,
            fg: style.fg.raw(),
            bg: style.bg.raw(),
            size: style.size,
            text,
        })
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<(), DisplayError> {
        self.check_point(from)?;
        self.check_point(to)?;
        self.send(&ControllerMessage::Line {
            x0: from.x,
            y0: from.y,
            x1: to.x,
            y1: to.y,
            color: color.raw(),
        })
    }

    fn draw_point(&mut self, at: Point, color: Color) -> Result<(), DisplayError> {
        self.check_point(at)?;
        self.send(&ControllerMessage::Point {
            x: at.x,
            y: at.y,
            color: color.raw(),
        })
    }

    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probewatch_protocol::frame::FrameParser;
    use probewatch_protocol::messages::MSG_CLEAR_REGION;

    #[test]
    fn test_clear_region_sends_one_frame() {
        let mut buf = [0u8; 64];
        let mut link = FrameLink::new(&mut buf[..]);
        link.clear_region(Rect::new(0, 10, 160, 12), Color::BLACK)
            .unwrap();
        assert_eq!(link.frames_sent(), 1);

        let mut parser = FrameParser::new();
        let frame = parser.feed_bytes(&buf).unwrap().unwrap();
        assert_eq!(frame.msg_type, MSG_CLEAR_REGION);
        assert_eq!(
            ControllerMessage::from_frame(&frame).unwrap(),
            ControllerMessage::ClearRegion {
                x: 0,
                y: 10,
                width: 160,
                height: 12,
                color: 0,
            }
        );
    }

    #[test]
    fn test_text_is_forwarded_with_style() {
        let mut buf = [0u8; 64];
        let mut link = FrameLink::new(&mut buf[..]);
        let style = TextStyle::new(Color::RED, Color::BLACK, 2);
        link.draw_text(Point::new(4, 20), "31.2C", style).unwrap();

        let mut parser = FrameParser::new();
        let frame = parser.feed_bytes(&buf).unwrap().unwrap();
        assert_eq!(
            ControllerMessage::from_frame(&frame).unwrap(),
            ControllerMessage::Text {
                x: 4,
                y: 20,
                fg: Color::RED.raw(),
                bg: 0,
                size: 2,
                text: "31.2C",
            }
        );
    }

    #[test]
    fn test_out_of_bounds_is_rejected_without_sending() {
        let mut buf = [0u8; 64];
        let mut link = FrameLink::new(&mut buf[..]);
        assert_eq!(
            link.draw_point(Point::new(PANEL_WIDTH, 0), Color::WHITE),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(
            link.clear_region(Rect::new(150, 0, 20, 10), Color::BLACK),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(link.frames_sent(), 0);
    }

    #[test]
    fn test_full_sink_is_communication_error() {
        let mut buf = [0u8; 3];
        let mut link = FrameLink::new(&mut buf[..]);
        assert_eq!(
            link.clear(Color::BLACK),
            Err(DisplayError::Communication)
        );
    }

    #[test]
    fn test_bounds_matches_panel() {
        let mut buf = [0u8; 4];
        let link = FrameLink::new(&mut buf[..]);
        assert_eq!(link.bounds(), Rect::new(0, 0, PANEL_WIDTH, PANEL_HEIGHT));
    }
}
