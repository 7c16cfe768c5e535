//! Per-channel sample history
//!
//! A fixed-capacity ring per channel plus derived statistics. The current
//! reading is tracked separately from the stored samples so the display
//! can follow every poll while history grows at the store cadence.

pub mod ring;
pub mod store;

pub use ring::{Sample, SampleRing};
pub use store::{RecordOutcome, SampleStore, Stats};
