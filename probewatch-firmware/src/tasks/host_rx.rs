//! Host UART receive task
//!
//! Splits the byte stream into COBS frames and forwards decoded commands.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use probewatch_protocol::CobsAccumulator;

use crate::channels::HOST_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Longest COBS frame accepted from the host
const FRAME_BUF_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn host_rx_task(mut rx: BufferedUartRx) {
    info!("Host RX task started");

    let mut frames = CobsAccumulator::<FRAME_BUF_SIZE>::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                for &byte in &buf[..n] {
                    match frames.feed(byte) {
                        Some(Ok(cmd)) => {
                            trace!("Host command: {:?}", cmd);
                            if HOST_CHANNEL.try_send(cmd).is_err() {
                                warn!("Host channel full, dropping {:?}", cmd);
                            }
                        }
                        Some(Err(e)) => warn!("Host frame error: {:?}", e),
                        None => {}
                    }
                }
            }
            Err(e) => warn!("Host UART read error: {:?}", e),
        }
    }
}
