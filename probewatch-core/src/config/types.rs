//! Configuration type definitions
//!
//! These are startup constants: the firmware loads them once and the
//! engine never mutates them afterwards.

/// Upper bound on attached probes
pub const MAX_CHANNELS: usize = 8;

/// Upper bound on samples kept per channel
pub const MAX_HISTORY: usize = 120;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Low threshold is not strictly below the high threshold
    ThresholdOrder,
    /// A threshold or tolerance is not a finite number
    NotFinite,
    /// Tolerance is negative
    NegativeTolerance,
    /// An interval that must be positive is zero
    ZeroInterval,
    /// History capacity is zero or above `MAX_HISTORY`
    Capacity,
    /// Channel bound is zero or above `MAX_CHANNELS`
    ChannelBound,
    /// Settle delay does not fit inside the poll interval
    SettleExceedsPoll,
}

/// Alarm thresholds in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmThresholds {
    /// Readings at or above this raise a high alarm
    pub high_c: f32,
    /// Readings at or below this raise a low alarm
    pub low_c: f32,
}

impl Default for AlarmThresholds {
    fn default() -> Self {
        Self {
            high_c: 30.0,
            low_c: 10.0,
        }
    }
}

/// Monitor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Maximum probes taken from enumeration
    pub max_channels: u8,
    /// Samples kept per channel
    pub history_capacity: u16,
    /// Time between conversion requests (ms)
    pub poll_interval_ms: u32,
    /// Wait between requesting and reading a conversion (ms)
    pub settle_ms: u32,
    /// Minimum spacing between stored history samples (ms)
    pub store_interval_ms: u32,
    /// Alarm thresholds
    pub thresholds: AlarmThresholds,
    /// Blink phase period while alarmed (ms)
    pub blink_interval_ms: u32,
    /// Minimum value change that justifies a partial redraw (°C)
    pub tolerance_c: f32,
    /// Main loop period (ms)
    pub loop_interval_ms: u32,
    /// Host link is considered down after this long without a ping (ms)
    pub host_timeout_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            max_channels: MAX_CHANNELS as u8,
            history_capacity: MAX_HISTORY as u16,
            poll_interval_ms: 1000,
            settle_ms: 750,
            store_interval_ms: 5000,
            thresholds: AlarmThresholds::default(),
            blink_interval_ms: 500,
            tolerance_c: 0.1,
            loop_interval_ms: 50,
            host_timeout_ms: 10_000,
        }
    }
}

impl MonitorConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if !t.high_c.is_finite() || !t.low_c.is_finite() || !self.tolerance_c.is_finite() {
            return Err(ConfigError::NotFinite);
        }
        if t.low_c >= t.high_c {
            return Err(ConfigError::ThresholdOrder);
        }
        if self.tolerance_c < 0.0 {
            return Err(ConfigError::NegativeTolerance);
        }
        if self.max_channels == 0 || usize::from(self.max_channels) > MAX_CHANNELS {
            return Err(ConfigError::ChannelBound);
        }
        if self.history_capacity == 0 || usize::from(self.history_capacity) > MAX_HISTORY {
            return Err(ConfigError::Capacity);
        }
        if self.poll_interval_ms == 0
            || self.blink_interval_ms == 0
            || self.loop_interval_ms == 0
            || self.host_timeout_ms == 0
        {
            return Err(ConfigError::ZeroInterval);
        }
        if self.settle_ms >= self.poll_interval_ms {
            return Err(ConfigError::SettleExceedsPoll);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(MonitorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut config = MonitorConfig::default();
        config.thresholds.low_c = 30.0;
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOrder));
        config.thresholds.low_c = 35.0;
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOrder));
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let mut config = MonitorConfig::default();
        config.thresholds.high_c = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::NotFinite));
    }

    #[test]
    fn test_rejects_capacity_out_of_bounds() {
        let mut config = MonitorConfig::default();
        config.history_capacity = 0;
        assert_eq!(config.validate(), Err(ConfigError::Capacity));
        config.history_capacity = MAX_HISTORY as u16 + 1;
        assert_eq!(config.validate(), Err(ConfigError::Capacity));
    }

    #[test]
    fn test_rejects_settle_longer_than_poll() {
        let mut config = MonitorConfig::default();
        config.settle_ms = config.poll_interval_ms;
        assert_eq!(config.validate(), Err(ConfigError::SettleExceedsPoll));
    }

    #[test]
    fn test_store_interval_may_be_zero() {
        let mut config = MonitorConfig::default();
        config.store_interval_ms = 0;
        assert_eq!(config.validate(), Ok(()));
        config.poll_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }
}
