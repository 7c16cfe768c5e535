//! Probe bank over multiplexed ADC inputs
//!
//! Each ADC input is one probe socket. Sockets that read as open circuit
//! at startup are treated as empty and never become channels.

use heapless::Vec;
use probewatch_core::config::MAX_CHANNELS;
use probewatch_core::traits::{ChannelId, Reading, SensorBus, SensorError};

use super::ntc::Thermistor;

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Number of inputs the reader can sample
    fn input_count(&self) -> u8;

    /// Read one input (12-bit, 0-4095)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self, input: u8) -> Result<u16, ()>;
}

#[derive(Debug, Clone, Copy)]
struct Socket {
    input: u8,
    raw: Result<u16, SensorError>,
}

/// NTC probes on an ADC, exposed as a sensor bus
///
/// `request_conversion` samples every channel and latches the raw ADC
/// counts; `read_value` converts the latched count to a temperature.
pub struct NtcProbeBank<A> {
    adc: A,
    thermistor: Thermistor,
    /// Reads averaged per conversion
    oversample: u8,
    sockets: Vec<Socket, MAX_CHANNELS>,
}

impl<A: AdcReader> NtcProbeBank<A> {
    pub fn new(adc: A, thermistor: Thermistor) -> Self {
        Self {
            adc,
            thermistor,
            oversample: 1,
            sockets: Vec::new(),
        }
    }

    /// Average `count` ADC reads per conversion
    pub fn with_oversample(mut self, count: u8) -> Self {
        self.oversample = count.max(1);
        self
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }

    fn sample(&mut self, input: u8) -> Result<u16, SensorError> {
        let mut sum = 0u32;
        for _ in 0..self.oversample {
            let raw = self
                .adc
                .read(input)
                .map_err(|_| SensorError::ConversionError)?;
            sum += u32::from(raw);
        }
        Ok((sum / u32::from(self.oversample)) as u16)
    }
}

impl<A: AdcReader> SensorBus for NtcProbeBank<A> {
    fn enumerate(&mut self) -> Vec<ChannelId, MAX_CHANNELS> {
        self.sockets.clear();
        let mut ids = Vec::new();
        for input in 0..self.adc.input_count() {
            let raw = self.sample(input);
            let present = raw.and_then(|r| self.thermistor.adc_to_resistance(r));
            match present {
                Err(SensorError::OpenCircuit) => continue,
                _ => {
                    let socket = Socket { input, raw };
                    if self.sockets.push(socket).is_err() {
                        break;
                    }
                    // Same length as sockets
                    let _ = ids.push(ChannelId(input));
                }
            }
        }
        ids
    }

    fn request_conversion(&mut self) -> Result<(), SensorError> {
        let mut failures = 0usize;
        for i in 0..self.sockets.len() {
            let input = self.sockets[i].input;
            let raw = self.sample(input);
            if raw.is_err() {
                failures += 1;
            }
            self.sockets[i].raw = raw;
        }

        if failures > 0 && failures == self.sockets.len() {
            return Err(SensorError::ConversionError);
        }
        Ok(())
    }

    fn read_value(&mut self, id: ChannelId) -> Reading {
        let Some(socket) = self.sockets.iter().find(|s| s.input == id.0) else {
            return Reading::Disconnected;
        };
        Reading::from(socket.raw.and_then(|r| self.thermistor.celsius(r)))
    }
}
