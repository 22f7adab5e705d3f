//! Configuration primitives for the wake-on-motion setup.

use crate::params::DataRate;

// INT1_THS and INT1_DURATION only use their lower seven bits.
const MAX_7BIT: u8 = 0x7F;

/// User-facing configuration for [`setup_wake_mode`](crate::Lis3dh::setup_wake_mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeConfig {
    /// Motion threshold written to `INT1_THS`. At ±2 g one LSB is 16 mg.
    pub threshold: u8,
    /// Minimum event duration written to `INT1_DURATION`, in ODR periods.
    pub duration: u8,
    /// Sampling rate used while in low-power mode.
    pub data_rate: DataRate,
}

impl WakeConfig {
    /// Begins building a [`WakeConfig`] using the builder pattern.
    pub fn new() -> WakeConfigBuilder {
        WakeConfigBuilder::new()
    }

    /// Checks whether this configuration fits the register fields.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.threshold > MAX_7BIT {
            return Err(ConfigError::ThresholdOutOfRange);
        }
        if self.duration > MAX_7BIT {
            return Err(ConfigError::DurationOutOfRange);
        }

        Ok(())
    }
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self {
            threshold: 16,
            duration: 0,
            data_rate: DataRate::Hz10,
        }
    }
}

/// Builder for [`WakeConfig`].
#[derive(Debug, Clone, Copy)]
pub struct WakeConfigBuilder {
    config: WakeConfig,
}

impl WakeConfigBuilder {
    /// Creates a new builder seeded with [`WakeConfig::default()`].
    pub fn new() -> Self {
        Self {
            config: WakeConfig::default(),
        }
    }

    /// Overrides the motion threshold.
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Overrides the event duration.
    pub fn duration(mut self, duration: u8) -> Self {
        self.config.duration = duration;
        self
    }

    /// Overrides the low-power sampling rate.
    pub fn data_rate(mut self, data_rate: DataRate) -> Self {
        self.config.data_rate = data_rate;
        self
    }

    /// Finalizes the builder and returns the [`WakeConfig`].
    pub fn build(self) -> WakeConfig {
        self.config
    }
}

impl Default for WakeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation errors generated while verifying a [`WakeConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Threshold does not fit the 7-bit `INT1_THS` field.
    ThresholdOutOfRange,
    /// Duration does not fit the 7-bit `INT1_DURATION` field.
    DurationOutOfRange,
}
