use core::fmt;

/// Reasons a [`Config`](crate::config::Config) is refused at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroMinutesPerPress,
    ZeroRefractoryWindow,
    ZeroIntensity,
    ZeroStormThreshold,
    InvertedThresholds { decrease_below: u16, increase_above: u16 },
    ThresholdOutOfRange(u16),
    PollNotFasterThanMinute { poll_ms: u32, minute_ms: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMinutesPerPress => write!(f, "minutes per press must be non-zero"),
            Self::ZeroRefractoryWindow => write!(f, "refractory window must be non-zero"),
            Self::ZeroIntensity => write!(f, "cell intensity must be non-zero"),
            Self::ZeroStormThreshold => write!(f, "storm threshold must be non-zero"),
            Self::InvertedThresholds {
                decrease_below,
                increase_above,
            } => write!(
                f,
                "decrease threshold {} must be below increase threshold {}",
                decrease_below, increase_above
            ),
            Self::ThresholdOutOfRange(value) => {
                write!(f, "threshold {} exceeds the 12-bit sample range", value)
            }
            Self::PollNotFasterThanMinute { poll_ms, minute_ms } => write!(
                f,
                "poll interval {} ms must be shorter than the minute period {} ms",
                poll_ms, minute_ms
            ),
        }
    }
}
