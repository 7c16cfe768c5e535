//! NTC 100K thermistor conversion
//!
//! Integer-only ADC → resistance → temperature using a lookup table with
//! linear interpolation. Results are in 0.1°C units.

use probewatch_core::traits::SensorError;

/// NTC 100K (B=3950) lookup table
///
/// Table format: (resistance_ohms, temperature_x10), sorted by decreasing
/// resistance. Generated from the beta equation with R0 = 100K at 25°C.
///
/// Temperature range: -40°C to 150°C
const TEMP_TABLE: &[(u32, i16)] = &[
    (3_400_000, -400),
    (1_750_000, -200),
    (1_000_000, -100),
    (600_000, 0),
    (350_000, 100),
    (200_000, 200),
    (100_000, 250),
    (80_000, 300),
    (55_000, 400),
    (30_000, 500),
    (18_000, 600),
    (12_000, 700),
    (8_000, 800),
    (5_500, 900),
    (4_000, 1000),
    (2_000, 1200),
    (1_000, 1500),
];

/// ADC counts this close to either rail are treated as a wiring fault
const RAIL_MARGIN: u16 = 10;

/// Voltage divider and ADC parameters for one probe input
///
/// Circuit: VCC -- pullup -- ADC_PIN -- NTC -- GND
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thermistor {
    /// Pull-up resistor value in ohms
    pub pullup_ohms: u32,
    /// Full-scale ADC count (4096 for 12-bit)
    pub adc_max: u16,
}

impl Default for Thermistor {
    fn default() -> Self {
        Self {
            pullup_ohms: 4_700,
            adc_max: 4096,
        }
    }
}

impl Thermistor {
    pub fn new(pullup_ohms: u32, adc_max: u16) -> Self {
        Self {
            pullup_ohms,
            adc_max,
        }
    }

    /// Convert an ADC reading to thermistor resistance
    ///
    /// R_ntc = R_pullup * adc / (adc_max - adc)
    pub fn adc_to_resistance(&self, adc_value: u16) -> Result<u32, SensorError> {
        // Nothing plugged in pulls the pin to VCC
        if adc_value >= self.adc_max.saturating_sub(RAIL_MARGIN) {
            return Err(SensorError::OpenCircuit);
        }
        if adc_value < RAIL_MARGIN {
            return Err(SensorError::ShortCircuit);
        }

        let numerator = u64::from(self.pullup_ohms) * u64::from(adc_value);
        let denominator = u64::from(self.adc_max - adc_value);
        Ok((numerator / denominator) as u32)
    }

    /// Temperature in 0.1°C units for a thermistor resistance
    pub fn resistance_to_temp_x10(resistance: u32) -> Result<i16, SensorError> {
        let (r_coldest, _) = TEMP_TABLE[0];
        let (r_hottest, _) = TEMP_TABLE[TEMP_TABLE.len() - 1];
        if resistance > r_coldest || resistance < r_hottest {
            return Err(SensorError::OutOfRange);
        }

        for pair in TEMP_TABLE.windows(2) {
            let (r_high, t_low) = pair[0];
            let (r_low, t_high) = pair[1];
            if resistance <= r_high && resistance >= r_low {
                let r_range = (r_high - r_low) as i32;
                let t_range = i32::from(t_high - t_low);
                let r_offset = (r_high - resistance) as i32;
                return Ok(t_low + (t_range * r_offset / r_range) as i16);
            }
        }

        Err(SensorError::OutOfRange)
    }

    /// Full conversion from an ADC reading to degrees Celsius
    pub fn celsius(&self, adc_value: u16) -> Result<f32, SensorError> {
        let resistance = self.adc_to_resistance(adc_value)?;
        let x10 = Self::resistance_to_temp_x10(resistance)?;
        Ok(f32::from(x10) / 10.0)
    }

    /// ADC count expected for a given resistance
    pub fn resistance_to_adc(&self, resistance: u32) -> u16 {
        let total = u64::from(self.pullup_ohms) + u64::from(resistance);
        (u64::from(self.adc_max) * u64::from(resistance) / total) as u16
    }
}
