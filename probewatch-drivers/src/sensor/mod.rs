//! Temperature probe drivers

mod bank;
mod ntc;

pub use bank::{AdcReader, NtcProbeBank};
pub use ntc::Thermistor;
