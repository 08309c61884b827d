//! Joystick X axis: one 12-bit sample per poll tick, classified by two
//! thresholds.

use log::warn;

/// Largest value a 12-bit conversion can produce.
pub const ADC_MAX: u16 = 4095;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDirection {
    Increase,
    Decrease,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisThresholds {
    pub decrease_below: u16,
    pub increase_above: u16,
}

impl Default for AxisThresholds {
    fn default() -> Self {
        Self {
            decrease_below: 1000,
            increase_above: 3000,
        }
    }
}

impl AxisThresholds {
    pub fn classify(&self, raw: u16) -> AxisDirection {
        if raw > self.increase_above {
            AxisDirection::Increase
        } else if raw < self.decrease_below {
            AxisDirection::Decrease
        } else {
            AxisDirection::Neutral
        }
    }
}

/// Source of raw axis conversions. `None` means the read failed.
pub trait AxisSampler {
    fn sample_raw(&mut self) -> Option<i16>;
}

pub struct JoystickAxisReader<S> {
    sampler: S,
    thresholds: AxisThresholds,
}

impl<S: AxisSampler> JoystickAxisReader<S> {
    pub fn new(sampler: S, thresholds: AxisThresholds) -> Self {
        Self {
            sampler,
            thresholds,
        }
    }

    /// Classify the current stick position. Failed or out-of-range samples
    /// count as `Neutral` so a flaky ADC never moves the countdown.
    pub fn sample(&mut self) -> AxisDirection {
        match self.sampler.sample_raw() {
            Some(raw) if (0..=ADC_MAX as i16).contains(&raw) => self.thresholds.classify(raw as u16),
            Some(raw) => {
                warn!("joystick sample {} outside 0..={}, ignored", raw, ADC_MAX);
                AxisDirection::Neutral
            }
            None => {
                warn!("joystick sample failed, ignored");
                AxisDirection::Neutral
            }
        }
    }
}
