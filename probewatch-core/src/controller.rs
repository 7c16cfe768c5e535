//! Main controller coordinating polling, alarms, rendering and telemetry
//!
//! The controller is the single cooperative loop body. Each `tick`:
//! - Drains queued input events into the view state machine
//! - Updates connectivity bookkeeping
//! - Advances the sensor poller and records finished conversions
//! - Re-evaluates alarms
//! - Renders changed regions if the display is on
//! - Publishes telemetry if a publish was requested
//!
//! Nothing in a tick is fatal; failures are returned in the `TickReport`.

use heapless::Vec;
use probewatch_display::DisplayBackend;
use probewatch_protocol::InputEvent;

use crate::alarm::{AlarmBank, AlarmTransition};
use crate::config::{ConfigError, MonitorConfig, MAX_CHANNELS, MAX_HISTORY};
use crate::history::{RecordOutcome, SampleStore};
use crate::render::{Layout, RenderOutcome, Renderer};
use crate::sensor::{ConversionPoller, PollStep};
use crate::telemetry::{PublishOutcome, TelemetryPublisher, TELEMETRY_SCRATCH_LEN};
use crate::traits::{ChannelId, MessagingClient, Reading, SensorBus};
use crate::view::{InputQueue, QueueFull, ViewChange, ViewEvent, ViewState, INPUT_QUEUE_LEN};

/// Everything that happened during one tick
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Input events processed
    pub inputs: u8,
    /// Mode or selection changed
    pub view_changed: bool,
    /// Display power toggled to this state
    pub power: Option<bool>,
    /// Messaging connectivity changed to this state
    pub link: Option<bool>,
    pub poll: PollStep,
    /// Samples appended to history
    pub stored: u8,
    /// Channels that read as disconnected
    pub disconnected: u8,
    pub alarms: Vec<(ChannelId, AlarmTransition), MAX_CHANNELS>,
    pub render: RenderOutcome,
    pub publish: PublishOutcome,
}

/// Controller state for coordinating subsystems
///
/// `C` bounds the channel count and `N` the samples kept per channel.
pub struct Controller<B, D, M, const C: usize = MAX_CHANNELS, const N: usize = MAX_HISTORY> {
    config: MonitorConfig,
    bus: B,
    display: D,
    messaging: M,
    store: SampleStore<C, N>,
    alarms: AlarmBank<C>,
    view: ViewState,
    inputs: InputQueue<INPUT_QUEUE_LEN>,
    poller: ConversionPoller,
    renderer: Renderer,
    telemetry: TelemetryPublisher,
    scratch: [u8; TELEMETRY_SCRATCH_LEN],
    was_connected: bool,
}

impl<B, D, M, const C: usize, const N: usize> Controller<B, D, M, C, N>
where
    B: SensorBus,
    D: DisplayBackend,
    M: MessagingClient,
{
    /// Validate the configuration and enumerate the probes
    ///
    /// The channel set is fixed from here on.
    pub fn new(
        config: MonitorConfig,
        mut bus: B,
        display: D,
        messaging: M,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let found = bus.enumerate();
        let limit = usize::from(config.max_channels).min(C).min(found.len());
        let store = SampleStore::new(
            &found[..limit],
            usize::from(config.history_capacity),
            config.store_interval_ms,
        );
        let channels = store.channel_count();
        let (width, height) = display.dimensions();
        let was_connected = messaging.connected();

        Ok(Self {
            alarms: AlarmBank::new(channels, config.thresholds, config.blink_interval_ms),
            view: ViewState::new(channels),
            inputs: InputQueue::new(),
            poller: ConversionPoller::new(config.poll_interval_ms, config.settle_ms),
            renderer: Renderer::new(config.tolerance_c, Layout::new(width, height)),
            telemetry: TelemetryPublisher::new(),
            scratch: [0; TELEMETRY_SCRATCH_LEN],
            store,
            config,
            bus,
            display,
            messaging,
            was_connected,
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn channel_count(&self) -> usize {
        self.store.channel_count()
    }

    pub fn store(&self) -> &SampleStore<C, N> {
        &self.store
    }

    pub fn alarms(&self) -> &AlarmBank<C> {
        &self.alarms
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn telemetry(&self) -> &TelemetryPublisher {
        &self.telemetry
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn messaging(&self) -> &M {
        &self.messaging
    }

    pub fn messaging_mut(&mut self) -> &mut M {
        &mut self.messaging
    }

    /// Queue a button click for the next tick
    pub fn push_input(&mut self, event: InputEvent) -> Result<(), QueueFull> {
        self.inputs.push(ViewEvent::from(event))
    }

    /// Queue a view event for the next tick
    pub fn push_view_event(&mut self, event: ViewEvent) -> Result<(), QueueFull> {
        self.inputs.push(event)
    }

    /// Publish a telemetry report as soon as the link allows
    pub fn request_publish(&mut self) {
        self.telemetry.request();
    }

    /// Run one loop iteration
    pub fn tick(&mut self, now_ms: u32) -> TickReport {
        let mut inputs = 0u8;
        let mut view_changed = false;
        let mut power = None;
        while let Some(event) = self.inputs.pop() {
            inputs = inputs.saturating_add(1);
            match self.view.handle(event) {
                ViewChange::None => {}
                ViewChange::Frame => view_changed = true,
                ViewChange::Power(on) => {
                    if on {
                        self.renderer.invalidate();
                    }
                    power = Some(on);
                }
            }
        }

        self.messaging.service(now_ms);
        let connected = self.messaging.connected();
        let link = (connected != self.was_connected).then_some(connected);
        self.was_connected = connected;

        let poll = self.poller.step(&mut self.bus, now_ms);
        let mut stored = 0u8;
        let mut disconnected = 0u8;
        if poll == PollStep::Ready {
            for index in 0..self.store.channel_count() {
                let reading = match self.store.channel_id(index) {
                    Some(id) => self.bus.read_value(id),
                    None => Reading::Disconnected,
                };
                match self.store.record(index, reading, now_ms) {
                    RecordOutcome::Stored => stored += 1,
                    RecordOutcome::Disconnected => disconnected += 1,
                    RecordOutcome::Deferred | RecordOutcome::Ignored => {}
                }
            }
        }

        let mut alarms = Vec::new();
        for index in 0..self.store.channel_count() {
            let reading = self
                .store
                .current_value(index)
                .unwrap_or(Reading::Disconnected);
            if let Some(transition) = self.alarms.update(index, reading, now_ms) {
                if let Some(id) = self.store.channel_id(index) {
                    // One entry per channel at most
                    let _ = alarms.push((id, transition));
                }
            }
        }

        let render = if self.view.display_on() {
            self.renderer
                .render(&mut self.display, &self.view, &self.store, &self.alarms)
        } else {
            RenderOutcome::Suspended
        };

        let publish =
            self.telemetry
                .publish(&mut self.messaging, &self.store, now_ms, &mut self.scratch);

        TickReport {
            inputs,
            view_changed,
            power,
            link,
            poll,
            stored,
            disconnected,
            alarms,
            render,
            publish,
        }
    }
}
