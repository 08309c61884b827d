//! Minute countdown controller for a small timer appliance.
//!
//! Two buttons and a joystick set the time, a 5x5 LED matrix, an RGB LED and
//! a character display show what the timer is doing, and a speaker plays a
//! melody when it runs out. Everything here is hardware-agnostic: outputs are
//! reached through the small traits in each module and through
//! `embedded-hal` pins and delays, so the state machine runs unchanged on the
//! host under `cargo test`.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod display;
pub mod error;
pub mod indicator;
pub mod joystick;
pub mod matrix;
pub mod melody;
pub mod state;

pub use clock::{MillisClock, MinuteCadence};
pub use config::{Config, Features};
pub use controller::{Controller, TickOutcome};
pub use debounce::{Activation, ClockPolicy, Debouncer, InputSource};
pub use display::TextDisplay;
pub use error::ConfigError;
pub use indicator::{Indicator, IndicatorColor, RgbIndicator};
pub use joystick::{AxisDirection, AxisSampler, AxisThresholds, JoystickAxisReader};
pub use matrix::{Channel, LedMatrix, MatrixTransport, Pictogram, RenderCommand};
pub use melody::{MelodyPlayer, Note, EXPIRY_MELODY};
pub use state::{Phase, TimerState};
