//! The countdown state machine.
//!
//! `Controller` owns the timer state, the debouncer, the LED matrix and the
//! RGB indicator. It is driven from two places:
//!
//! - the edge interrupt, through [`Controller::on_edge`], once per falling edge;
//! - the main loop, through [`Controller::tick`], every poll interval.
//!
//! Both are expected to run inside the same critical section (the firmware
//! keeps the controller in a `LockMut`), which makes every transition atomic
//! with respect to the other context. Slow outputs stay outside that section:
//! `tick` reports the melody through [`TickOutcome::play_melody`], and the
//! character display line is only recorded here and handed out by
//! [`Controller::take_display_update`] for the caller to draw and flush after
//! releasing the lock.

use log::{debug, info};

use crate::{
    clock::MinuteCadence,
    config::Config,
    debounce::{Activation, Debouncer, InputSource},
    error::ConfigError,
    indicator::{Indicator, IndicatorColor},
    joystick::AxisDirection,
    matrix::{Channel, LedMatrix, MatrixTransport, Pictogram, RenderCommand},
    state::{Phase, TimerState},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A minute was taken off the countdown this tick.
    pub minute_elapsed: bool,
    /// The countdown ran out and was stopped this tick.
    pub expired: bool,
    /// The caller should now play the expiry melody.
    pub play_melody: bool,
}

pub struct Controller<M, I> {
    config: Config,
    state: TimerState,
    debouncer: Debouncer,
    minute: MinuteCadence,
    // Minutes to show on the character display, not yet handed out
    pending_line: Option<u32>,
    matrix: LedMatrix<M>,
    indicator: I,
}

impl<M, I> Controller<M, I>
where
    M: MatrixTransport,
    I: Indicator,
{
    pub fn new(config: Config, matrix: M, indicator: I) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: TimerState::new(),
            debouncer: Debouncer::new(
                config.refractory_ms,
                config.clock_policy,
                config.storm_threshold,
            ),
            minute: MinuteCadence::new(config.minute_ms),
            pending_line: None,
            matrix: LedMatrix::new(matrix, config.cell_intensity),
            indicator,
            config,
        })
    }

    /// Boot screen: indicator dark, display showing the empty countdown.
    pub fn start(&mut self) {
        self.indicator.show(IndicatorColor::Off);
        self.refresh_display();
        info!("countdown ready");
    }

    /// Feed one raw falling edge. Returns the activation if it got through
    /// the debouncer, after applying it.
    pub fn on_edge(&mut self, source: InputSource, now_ms: u32) -> Option<Activation> {
        let activation = self.debouncer.on_edge(source, now_ms)?;
        self.apply(activation);
        Some(activation)
    }

    /// Apply an already debounced activation.
    pub fn apply(&mut self, activation: Activation) {
        match activation.source {
            InputSource::ButtonA => {
                self.state.add_minutes(self.config.minutes_per_press);
                self.resume(activation.at_ms);
                debug!(
                    "button A: +{} min, {} min left",
                    self.config.minutes_per_press, self.state.remaining_minutes
                );
            }
            InputSource::JoystickPress => {
                self.resume(activation.at_ms);
                debug!("joystick press: resumed at {} min", self.state.remaining_minutes);
            }
            InputSource::ButtonB => {
                self.state.cancel();
                self.minute.disarm();
                self.indicator.show(IndicatorColor::Green);
                self.render(Pictogram::Check, Channel::Green);
                debug!("button B: cancelled with {} min left", self.state.remaining_minutes);
            }
        }
    }

    fn resume(&mut self, now_ms: u32) {
        self.state.activate();
        if !self.minute.is_armed() {
            self.minute.arm(now_ms);
        }
        self.indicator.show(IndicatorColor::Blue);
        self.refresh_display();
        self.render(Pictogram::Ellipsis, Channel::Blue);
    }

    /// One poll of the main loop: minute decrement if due, expiry check,
    /// joystick adjustment, display refresh, in that order.
    pub fn tick(&mut self, now_ms: u32, direction: AxisDirection) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if self.state.is_active {
            if !self.minute.is_armed() {
                self.minute.arm(now_ms);
            }
            if self.minute.poll(now_ms) && self.state.tick_minute() {
                outcome.minute_elapsed = true;
                debug!("minute elapsed, {} min left", self.state.remaining_minutes);
            }
        }

        if self.state.take_expiry() {
            self.minute.disarm();
            self.indicator.show(IndicatorColor::Red);
            self.render(Pictogram::Alert, Channel::Red);
            outcome.expired = true;
            outcome.play_melody = self.config.features.buzzer;
            info!("countdown expired");
        } else if !self.state.is_active {
            self.minute.disarm();
        }

        match direction {
            AxisDirection::Increase => self.state.add_minutes(1),
            AxisDirection::Decrease => self.state.remove_minute(),
            AxisDirection::Neutral => {}
        }

        self.refresh_display();
        outcome
    }

    fn render(&mut self, pictogram: Pictogram, channel: Channel) {
        if self.config.features.led_matrix {
            self.matrix.show(RenderCommand { pictogram, channel });
        }
    }

    fn refresh_display(&mut self) {
        self.pending_line = Some(self.state.remaining_minutes);
    }

    /// Minutes the character display should show, if they changed hands since
    /// the last call. Several refreshes between two calls collapse into one.
    pub fn take_display_update(&mut self) -> Option<u32> {
        self.pending_line.take()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// When the next minute comes off, if the countdown is running.
    pub fn next_minute_at(&self) -> Option<u32> {
        self.minute.deadline_ms()
    }

    pub fn matrix(&self) -> &M {
        self.matrix.transport()
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }
}
