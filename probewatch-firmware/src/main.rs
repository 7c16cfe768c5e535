//! Probewatch - Multi-Probe Temperature Monitor Firmware
//!
//! Main firmware binary for RP2040-based boards. NTC probes on the ADC
//! are polled, logged into bounded history and shown on a UART display
//! module; a host on the second UART can pull telemetry.
//!
//! Board wiring:
//! - UART0 (GPIO0 TX, GPIO1 RX): display module
//! - UART1 (GPIO4 TX, GPIO5 RX): host link
//! - ADC (GPIO26-29): probe sockets

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use probewatch_display::FrameLink;
use probewatch_drivers::host::{SerialHost, HOST_TX_LEN};
use probewatch_drivers::sensor::{NtcProbeBank, Thermistor};

use crate::adc::RpAdc;
use crate::tasks::Monitor;

mod adc;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

/// ADC reads averaged per probe conversion
const OVERSAMPLE: u8 = 4;

/// Standard 4.7K pull-up on every probe socket
const PULLUP_OHMS: u32 = 4_700;

// Static cells for UART buffers (must live forever)
static DISPLAY_TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static DISPLAY_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
// Sized for a whole telemetry frame
static HOST_TX_BUF: StaticCell<[u8; HOST_TX_LEN]> = StaticCell::new();
static HOST_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

static MONITOR: StaticCell<Monitor> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Probewatch firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let monitor_config = config::load();

    // Display link, 115200 baud default
    let display_uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let display_uart = display_uart.into_buffered(
        Irqs,
        DISPLAY_TX_BUF.init([0u8; 512]),
        DISPLAY_RX_BUF.init([0u8; 64]),
    );
    let (display_tx, display_rx) = display_uart.split();
    info!("UART0 initialized for display communication");

    // Host link
    let host_uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, UartConfig::default());
    let host_uart = host_uart.into_buffered(
        Irqs,
        HOST_TX_BUF.init([0u8; HOST_TX_LEN]),
        HOST_RX_BUF.init([0u8; 64]),
    );
    let (host_tx, host_rx) = host_uart.split();
    info!("UART1 initialized for host link");

    // Probe sockets
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let inputs = [
        Channel::new_pin(p.PIN_26, Pull::None),
        Channel::new_pin(p.PIN_27, Pull::None),
        Channel::new_pin(p.PIN_28, Pull::None),
        Channel::new_pin(p.PIN_29, Pull::None),
    ];
    let bank = NtcProbeBank::new(RpAdc::new(adc, inputs), Thermistor::new(PULLUP_OHMS, 4096))
        .with_oversample(OVERSAMPLE);

    let display = FrameLink::new(display_tx);
    let host = SerialHost::new(host_tx, monitor_config.host_timeout_ms);

    let monitor = match Monitor::new(monitor_config, bank, display, host) {
        Ok(monitor) => monitor,
        // load() only returns validated configurations
        Err(e) => defmt::panic!("Invalid monitor configuration: {:?}", e),
    };
    info!("{} probes found", monitor.channel_count());
    for id in monitor.store().ids() {
        debug!("Probe on ADC input {}", id.0);
    }
    let monitor = MONITOR.init(monitor);

    spawner.spawn(tasks::display_rx_task(display_rx)).unwrap();
    spawner.spawn(tasks::host_rx_task(host_rx)).unwrap();
    spawner.spawn(tasks::monitor_task(monitor)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
