//! Monitor task
//!
//! Owns the controller and runs one `tick` per loop interval. Before each
//! tick it drains what the receive tasks collected since the last one.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Instant, Ticker};

use probewatch_core::render::RenderOutcome;
use probewatch_core::sensor::PollStep;
use probewatch_core::telemetry::PublishOutcome;
use probewatch_core::{Controller, TickReport};
use probewatch_display::FrameLink;
use probewatch_drivers::host::SerialHost;
use probewatch_drivers::sensor::NtcProbeBank;
use probewatch_protocol::HostCommand;

use crate::adc::RpAdc;
use crate::channels::{DISPLAY_PING, HOST_CHANNEL, INPUT_CHANNEL};

/// The controller as wired on this board
pub type Monitor =
    Controller<NtcProbeBank<RpAdc>, FrameLink<BufferedUartTx>, SerialHost<BufferedUartTx>>;

#[embassy_executor::task]
pub async fn monitor_task(monitor: &'static mut Monitor) {
    let loop_ms = monitor.config().loop_interval_ms;
    info!("Monitor task started ({}ms loop)", loop_ms);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(loop_ms)));

    loop {
        // Wraps after ~49 days; core time math is wrap-safe
        let now_ms = Instant::now().as_millis() as u32;

        forward_inputs(monitor);
        handle_host_commands(monitor, now_ms);
        answer_display_ping(monitor);

        let report = monitor.tick(now_ms);
        log_report(&report);

        ticker.next().await;
    }
}

fn forward_inputs(monitor: &mut Monitor) {
    while let Ok(event) = INPUT_CHANNEL.try_receive() {
        if let Err(full) = monitor.push_input(event) {
            warn!("Input queue full, dropping {:?}", full.0);
        }
    }
}

fn handle_host_commands(monitor: &mut Monitor, now_ms: u32) {
    while let Ok(cmd) = HOST_CHANNEL.try_receive() {
        match cmd {
            HostCommand::Ping => monitor.messaging_mut().heartbeat_received(now_ms),
            HostCommand::RequestRefresh => {
                debug!("Telemetry refresh requested");
                monitor.request_publish();
            }
        }
    }
}

fn answer_display_ping(monitor: &mut Monitor) {
    if DISPLAY_PING.signaled() {
        DISPLAY_PING.reset();
        if let Err(e) = monitor.display_mut().send_pong() {
            warn!("Failed to send PONG: {:?}", e);
        }
    }
}

fn log_report(report: &TickReport) {
    match report.link {
        Some(true) => info!("Host link up"),
        Some(false) => warn!("Host link down"),
        None => {}
    }

    if let Some(on) = report.power {
        info!("Display {}", if on { "on" } else { "off" });
    }

    match report.poll {
        PollStep::RequestFailed(e) => warn!("Conversion request failed: {:?}", e),
        PollStep::Ready => debug!(
            "Conversion read: {} stored, {} disconnected",
            report.stored, report.disconnected
        ),
        PollStep::Requested | PollStep::Waiting => {}
    }

    for (id, transition) in report.alarms.iter() {
        warn!("Probe {}: {:?} -> {:?}", id.0, transition.from, transition.to);
    }

    match report.render {
        RenderOutcome::Failed(e) => warn!("Draw failed, full redraw next tick: {:?}", e),
        RenderOutcome::Drawn { full, regions } => {
            trace!("Drew {} regions (full={})", regions, full)
        }
        RenderOutcome::Unchanged | RenderOutcome::Suspended => {}
    }

    match report.publish {
        PublishOutcome::Published { bytes, delivered } => {
            if delivered {
                info!("Telemetry published ({} bytes)", bytes);
            } else {
                warn!("Telemetry write failed ({} bytes)", bytes);
            }
        }
        PublishOutcome::Failed(e) => warn!("Telemetry encode failed: {:?}", e),
        PublishOutcome::Offline => trace!("Telemetry pending, host offline"),
        PublishOutcome::Idle => {}
    }
}
