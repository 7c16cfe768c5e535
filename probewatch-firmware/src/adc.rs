//! RP2040 ADC adapter for the probe bank

use embassy_rp::adc::{Adc, Blocking, Channel};
use probewatch_drivers::sensor::AdcReader;

/// Probe sockets wired to GPIO26-29
pub const PROBE_INPUTS: usize = 4;

/// Blocking ADC with one channel per probe socket
pub struct RpAdc {
    adc: Adc<'static, Blocking>,
    inputs: [Channel<'static>; PROBE_INPUTS],
}

impl RpAdc {
    pub fn new(adc: Adc<'static, Blocking>, inputs: [Channel<'static>; PROBE_INPUTS]) -> Self {
        Self { adc, inputs }
    }
}

impl AdcReader for RpAdc {
    fn input_count(&self) -> u8 {
        PROBE_INPUTS as u8
    }

    fn read(&mut self, input: u8) -> Result<u16, ()> {
        let channel = self.inputs.get_mut(usize::from(input)).ok_or(())?;
        self.adc.blocking_read(channel).map_err(|_| ())
    }
}
