//! Temperature sensor bus trait

use crate::config::MAX_CHANNELS;
use heapless::Vec;

/// Value reported on the wire for a channel with no valid reading
///
/// Matches the DS18B20 convention for a missing device.
pub const DISCONNECTED_C: f32 = -127.0;

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor disconnected (open circuit)
    OpenCircuit,
    /// Sensor shorted to ground
    ShortCircuit,
    /// Reading out of expected range
    OutOfRange,
    /// ADC or bus conversion error
    ConversionError,
}

/// Identifier of one probe on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId(pub u8);

/// Latest value of a probe
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// Valid temperature in degrees Celsius
    Celsius(f32),
    /// No valid reading (unplugged, shorted, or garbage)
    Disconnected,
}

impl Reading {
    /// Normalise a raw value: non-finite values and the sentinel become
    /// `Disconnected`
    pub fn from_celsius(value: f32) -> Self {
        if value.is_finite() && value != DISCONNECTED_C {
            Reading::Celsius(value)
        } else {
            Reading::Disconnected
        }
    }

    /// Temperature, if the reading is valid
    pub fn celsius(&self) -> Option<f32> {
        match *self {
            Reading::Celsius(v) => Some(v),
            Reading::Disconnected => None,
        }
    }

    pub fn is_disconnected(&self) -> bool {
        matches!(self, Reading::Disconnected)
    }

    /// Value for the wire, with the sentinel standing in for no reading
    pub fn to_wire(&self) -> f32 {
        self.celsius().unwrap_or(DISCONNECTED_C)
    }
}

impl From<Result<f32, SensorError>> for Reading {
    fn from(result: Result<f32, SensorError>) -> Self {
        match result {
            Ok(v) => Reading::from_celsius(v),
            Err(_) => Reading::Disconnected,
        }
    }
}

/// Trait for a bus of temperature probes
///
/// Polling is two-phase: `request_conversion` starts a measurement on
/// every probe without blocking, and after the settle delay the results
/// are fetched one channel at a time with `read_value`.
pub trait SensorBus {
    /// Discover attached probes
    ///
    /// Called once at startup; the channel set is fixed afterwards.
    fn enumerate(&mut self) -> Vec<ChannelId, MAX_CHANNELS>;

    /// Start a conversion on all probes
    fn request_conversion(&mut self) -> Result<(), SensorError>;

    /// Fetch the result of the last conversion for one probe
    fn read_value(&mut self, id: ChannelId) -> Reading;
}
