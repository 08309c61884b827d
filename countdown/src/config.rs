//! Startup configuration.
//!
//! The defaults are the appliance's reference constants; the firmware builds
//! one `Config` at boot and hands it to the controller.

use crate::{
    debounce::ClockPolicy,
    error::ConfigError,
    joystick::{AxisThresholds, ADC_MAX},
};

/// Which optional outputs are wired on this build of the appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub led_matrix: bool,
    pub buzzer: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            led_matrix: true,
            buzzer: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Added to the countdown by every Button A activation
    pub minutes_per_press: u32,
    pub refractory_ms: u32,
    pub poll_interval_ms: u32,
    pub minute_ms: u32,
    /// Value of a lit matrix cell in its color byte
    pub cell_intensity: u8,
    pub thresholds: AxisThresholds,
    pub clock_policy: ClockPolicy,
    /// Rejected edges in one burst before a storm warning is logged, non-zero
    pub storm_threshold: u32,
    pub features: Features,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            minutes_per_press: 5,
            refractory_ms: 200,
            poll_interval_ms: 200,
            minute_ms: 60_000,
            cell_intensity: 50,
            thresholds: AxisThresholds::default(),
            clock_policy: ClockPolicy::PerSource,
            storm_threshold: 8,
            features: Features::default(),
        }
    }
}

impl Config {
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn with_clock_policy(mut self, clock_policy: ClockPolicy) -> Self {
        self.clock_policy = clock_policy;
        self
    }

    pub fn with_thresholds(mut self, thresholds: AxisThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minutes_per_press == 0 {
            return Err(ConfigError::ZeroMinutesPerPress);
        }
        if self.refractory_ms == 0 {
            return Err(ConfigError::ZeroRefractoryWindow);
        }
        if self.cell_intensity == 0 {
            return Err(ConfigError::ZeroIntensity);
        }
        if self.storm_threshold == 0 {
            return Err(ConfigError::ZeroStormThreshold);
        }

        let AxisThresholds {
            decrease_below,
            increase_above,
        } = self.thresholds;
        if increase_above > ADC_MAX {
            return Err(ConfigError::ThresholdOutOfRange(increase_above));
        }
        if decrease_below >= increase_above {
            return Err(ConfigError::InvertedThresholds {
                decrease_below,
                increase_above,
            });
        }

        if self.poll_interval_ms >= self.minute_ms {
            return Err(ConfigError::PollNotFasterThanMinute {
                poll_ms: self.poll_interval_ms,
                minute_ms: self.minute_ms,
            });
        }
        Ok(())
    }
}
