//! Message types for the display link
//!
//! Message types are divided into two categories:
//! - Display → Controller: button events, heartbeat requests
//! - Controller → Display: region-scoped drawing commands, heartbeat responses
//!
//! Coordinates are pixels, colours are RGB565, multi-byte fields are
//! little-endian.

use crate::events::InputEvent;
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use heapless::Vec;

// Message type IDs: Display → Controller
pub const MSG_INPUT: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;

// Message type IDs: Controller → Display
pub const MSG_CLEAR: u8 = 0x20;
pub const MSG_CLEAR_REGION: u8 = 0x21;
pub const MSG_TEXT: u8 = 0x22;
pub const MSG_LINE: u8 = 0x23;
pub const MSG_POINT: u8 = 0x24;
pub const MSG_PONG: u8 = 0x25;

/// Longest text run sent in one TEXT message
pub const MAX_TEXT_LEN: usize = 32;

/// Size of the fixed TEXT header (x, y, fg, bg, size, len)
const TEXT_HEADER_LEN: usize = 10;

/// Messages from the controller to the display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerMessage<'a> {
    /// Fill the whole frame buffer (full redraw only)
    Clear { color: u16 },
    /// Fill a rectangle
    ClearRegion {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: u16,
    },
    /// Draw a run of text with its top-left corner at (x, y)
    Text {
        x: u16,
        y: u16,
        fg: u16,
        bg: u16,
        size: u8,
        text: &'a str,
    },
    /// Draw a one-pixel line
    Line {
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: u16,
    },
    /// Set a single pixel
    Point { x: u16, y: u16, color: u16 },
    /// Heartbeat response
    Pong,
}

struct PayloadWriter(Vec<u8, MAX_PAYLOAD_SIZE>);

impl PayloadWriter {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn u8(mut self, value: u8) -> Result<Self, FrameError> {
        self.0.push(value).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(self)
    }

    fn u16(mut self, value: u16) -> Result<Self, FrameError> {
        self.0
            .extend_from_slice(&value.to_le_bytes())
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(self)
    }

    fn bytes(mut self, value: &[u8]) -> Result<Self, FrameError> {
        self.0
            .extend_from_slice(value)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(self)
    }

    fn finish(self, msg_type: u8) -> Result<Frame, FrameError> {
        Frame::new(msg_type, &self.0)
    }
}

fn read_u16(payload: &[u8], offset: usize) -> Result<u16, FrameError> {
    payload
        .get(offset..offset + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or(FrameError::InvalidFrame)
}

/// Clip a string to at most `max` bytes without splitting a character
fn clip(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

impl<'a> ControllerMessage<'a> {
    /// Encode this message into a frame
    ///
    /// Text longer than [`MAX_TEXT_LEN`] bytes is clipped.
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match *self {
            ControllerMessage::Clear { color } => PayloadWriter::new().u16(color)?.finish(MSG_CLEAR),
            ControllerMessage::ClearRegion {
                x,
                y,
                width,
                height,
                color,
            } => PayloadWriter::new()
                .u16(x)?
                .u16(y)?
                .u16(width)?
                .u16(height)?
                .u16(color)?
                .finish(MSG_CLEAR_REGION),
            ControllerMessage::Text {
                x,
                y,
                fg,
                bg,
                size,
                text,
            } => {
                let text = clip(text, MAX_TEXT_LEN);
                PayloadWriter::new()
                    .u16(x)?
                    .u16(y)?
                    .u16(fg)?
                    .u16(bg)?
                    .u8(size)?
                    .u8(text.len() as u8)?
                    .bytes(text.as_bytes())?
                    .finish(MSG_TEXT)
            }
            ControllerMessage::Line {
                x0,
                y0,
                x1,
                y1,
                color,
            } => PayloadWriter::new()
                .u16(x0)?
                .u16(y0)?
                .u16(x1)?
                .u16(y1)?
                .u16(color)?
                .finish(MSG_LINE),
            ControllerMessage::Point { x, y, color } => PayloadWriter::new()
                .u16(x)?
                .u16(y)?
                .u16(color)?
                .finish(MSG_POINT),
            ControllerMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }

    /// Parse a controller message from a frame (display-module side)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let p = frame.payload.as_slice();
        match frame.msg_type {
            MSG_CLEAR => Ok(ControllerMessage::Clear {
                color: read_u16(p, 0)?,
            }),
            MSG_CLEAR_REGION => Ok(ControllerMessage::ClearRegion {
                x: read_u16(p, 0)?,
                y: read_u16(p, 2)?,
                width: read_u16(p, 4)?,
                height: read_u16(p, 6)?,
                color: read_u16(p, 8)?,
            }),
            MSG_TEXT => {
                let size = *p.get(8).ok_or(FrameError::InvalidFrame)?;
                let len = usize::from(*p.get(9).ok_or(FrameError::InvalidFrame)?);
                let raw = p
                    .get(TEXT_HEADER_LEN..TEXT_HEADER_LEN + len)
                    .ok_or(FrameError::InvalidFrame)?;
                let text = core::str::from_utf8(raw).map_err(|_| FrameError::InvalidFrame)?;
                Ok(ControllerMessage::Text {
                    x: read_u16(p, 0)?,
                    y: read_u16(p, 2)?,
                    fg: read_u16(p, 4)?,
                    bg: read_u16(p, 6)?,
                    size,
                    text,
                })
            }
            MSG_LINE => Ok(ControllerMessage::Line {
                x0: read_u16(p, 0)?,
                y0: read_u16(p, 2)?,
                x1: read_u16(p, 4)?,
                y1: read_u16(p, 6)?,
                color: read_u16(p, 8)?,
            }),
            MSG_POINT => Ok(ControllerMessage::Point {
                x: read_u16(p, 0)?,
                y: read_u16(p, 2)?,
                color: read_u16(p, 4)?,
            }),
            MSG_PONG => Ok(ControllerMessage::Pong),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

/// Commands parsed from display-originated frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand {
    /// Debounced button click
    Input(InputEvent),
    /// Heartbeat request
    Ping,
}

impl DisplayCommand {
    /// Parse a command from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_INPUT => {
                let byte = *frame.payload.first().ok_or(FrameError::InvalidFrame)?;
                InputEvent::from_byte(byte)
                    .map(DisplayCommand::Input)
                    .ok_or(FrameError::InvalidFrame)
            }
            MSG_PING => Ok(DisplayCommand::Ping),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this command into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            DisplayCommand::Input(event) => Frame::new(MSG_INPUT, &[event.to_byte()]),
            DisplayCommand::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_region_layout() {
        let msg = ControllerMessage::ClearRegion {
            x: 2,
            y: 300,
            width: 16,
            height: 8,
            color: 0xF800,
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_CLEAR_REGION);
        assert_eq!(
            frame.payload.as_slice(),
            &[2, 0, 0x2C, 0x01, 16, 0, 8, 0, 0x00, 0xF8]
        );
    }

    #[test]
    fn test_text_header_and_body() {
        let msg = ControllerMessage::Text {
            x: 4,
            y: 10,
            fg: 0xFFFF,
            bg: 0x0000,
            size: 2,
            text: "21.5",
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_TEXT);
        assert_eq!(frame.payload[8], 2);
        assert_eq!(frame.payload[9], 4);
        assert_eq!(&frame.payload[10..], b"21.5");
        assert_eq!(ControllerMessage::from_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn test_long_text_is_clipped() {
        let long = "0123456789012345678901234567890123456789";
        let msg = ControllerMessage::Text {
            x: 0,
            y: 0,
            fg: 0,
            bg: 0,
            size: 1,
            text: long,
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(usize::from(frame.payload[9]), MAX_TEXT_LEN);
        match ControllerMessage::from_frame(&frame).unwrap() {
            ControllerMessage::Text { text, .. } => assert_eq!(text, &long[..MAX_TEXT_LEN]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_clip_respects_char_boundary() {
        assert_eq!(clip("ab°c", 3), "ab");
        assert_eq!(clip("abc", 8), "abc");
    }

    #[test]
    fn test_truncated_payload_is_invalid() {
        let frame = Frame::new(MSG_LINE, &[1, 0, 2]).unwrap();
        assert_eq!(
            ControllerMessage::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_display_command_input() {
        let frame = Frame::new(MSG_INPUT, &[0x12]).unwrap();
        assert_eq!(
            DisplayCommand::from_frame(&frame).unwrap(),
            DisplayCommand::Input(InputEvent::Prev)
        );
    }

    #[test]
    fn test_display_command_rejects_unknown_button() {
        let frame = Frame::new(MSG_INPUT, &[0x7F]).unwrap();
        assert_eq!(
            DisplayCommand::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_display_command_ping() {
        let frame = DisplayCommand::Ping.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_PING);
        assert_eq!(
            DisplayCommand::from_frame(&frame).unwrap(),
            DisplayCommand::Ping
        );
    }
}
