//! Display UART receive task
//!
//! Receives frames from the display module and dispatches events.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use probewatch_protocol::{DisplayCommand, FrameParser};

use crate::channels::{DISPLAY_PING, INPUT_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Display RX task - receives and parses frames from the display module
#[embassy_executor::task]
pub async fn display_rx_task(mut rx: BufferedUartRx) {
    info!("Display RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match DisplayCommand::from_frame(&frame) {
                            Ok(cmd) => handle_display_command(cmd),
                            Err(e) => warn!("Failed to parse display command: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}

fn handle_display_command(cmd: DisplayCommand) {
    match cmd {
        DisplayCommand::Ping => {
            trace!("PING received");
            DISPLAY_PING.signal(());
        }
        DisplayCommand::Input(event) => {
            debug!("Input event: {:?}", event);
            if INPUT_CHANNEL.try_send(event).is_err() {
                warn!("Input channel full, dropping event");
            }
        }
    }
}
