//! Edge debouncing for the two buttons and the joystick switch.
//!
//! Every falling edge is timestamped in the interrupt handler and passed to
//! [`Debouncer::on_edge`]. An edge only becomes an [`Activation`] if more than
//! the refractory window has passed since the last accepted activation; a
//! rejected edge leaves the clock untouched.

use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    ButtonA,
    ButtonB,
    JoystickPress,
}

impl InputSource {
    pub const ALL: [InputSource; 3] = [Self::ButtonA, Self::ButtonB, Self::JoystickPress];

    fn index(self) -> usize {
        match self {
            Self::ButtonA => 0,
            Self::ButtonB => 1,
            Self::JoystickPress => 2,
        }
    }
}

/// A debounced press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub source: InputSource,
    pub at_ms: u32,
}

/// Whether each input has its own refractory clock or all three share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPolicy {
    PerSource,
    /// One window gates every input: a press on B right after A is dropped.
    Shared,
}

#[derive(Debug)]
pub struct Debouncer {
    window_ms: u32,
    policy: ClockPolicy,
    storm_threshold: u32,
    last_accepted: [Option<u32>; 3],
    // Rejections since the last accepted edge of each source
    burst: [u32; 3],
    total_rejected: u32,
    storm_warnings: u32,
}

impl Debouncer {
    pub fn new(window_ms: u32, policy: ClockPolicy, storm_threshold: u32) -> Self {
        Self {
            window_ms,
            policy,
            storm_threshold,
            last_accepted: [None; 3],
            burst: [0; 3],
            total_rejected: 0,
            storm_warnings: 0,
        }
    }

    fn slot(&self, source: InputSource) -> usize {
        match self.policy {
            ClockPolicy::PerSource => source.index(),
            ClockPolicy::Shared => 0,
        }
    }

    pub fn on_edge(&mut self, source: InputSource, now_ms: u32) -> Option<Activation> {
        let slot = self.slot(source);
        let accepted = match self.last_accepted[slot] {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) > self.window_ms,
        };

        if accepted {
            self.last_accepted[slot] = Some(now_ms);
            self.burst[source.index()] = 0;
            debug!("{:?} accepted at {} ms", source, now_ms);
            return Some(Activation {
                source,
                at_ms: now_ms,
            });
        }

        let burst = &mut self.burst[source.index()];
        *burst = burst.saturating_add(1);
        self.total_rejected = self.total_rejected.saturating_add(1);
        if *burst == self.storm_threshold {
            self.storm_warnings = self.storm_warnings.saturating_add(1);
            warn!(
                "{:?}: {} edges rejected inside one {} ms window, possible interrupt storm",
                source, burst, self.window_ms
            );
        }
        None
    }

    /// Edges of `source` rejected since its last accepted activation.
    pub fn rejected(&self, source: InputSource) -> u32 {
        self.burst[source.index()]
    }

    pub fn total_rejected(&self) -> u32 {
        self.total_rejected
    }

    /// Storm warnings logged so far, at most one per burst.
    pub fn storm_warnings(&self) -> u32 {
        self.storm_warnings
    }

    pub fn last_accepted(&self, source: InputSource) -> Option<u32> {
        self.last_accepted[self.slot(source)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> Debouncer {
        Debouncer::new(200, ClockPolicy::PerSource, 8)
    }

    #[test]
    fn first_edge_is_accepted() {
        let mut d = debouncer();
        assert_eq!(
            d.on_edge(InputSource::ButtonA, 5),
            Some(Activation {
                source: InputSource::ButtonA,
                at_ms: 5
            })
        );
    }

    #[test]
    fn bounce_inside_window_is_dropped() {
        let mut d = debouncer();
        assert!(d.on_edge(InputSource::ButtonA, 1_000).is_some());
        assert!(d.on_edge(InputSource::ButtonA, 1_050).is_none());
        assert!(d.on_edge(InputSource::ButtonA, 1_200).is_none()); // exactly 200 ms
        assert!(d.on_edge(InputSource::ButtonA, 1_201).is_some());
    }

    #[test]
    fn rejection_does_not_move_the_clock() {
        let mut d = debouncer();
        d.on_edge(InputSource::ButtonB, 0);
        d.on_edge(InputSource::ButtonB, 150);
        d.on_edge(InputSource::ButtonB, 190);
        assert_eq!(d.last_accepted(InputSource::ButtonB), Some(0));
        assert!(d.on_edge(InputSource::ButtonB, 201).is_some());
    }

    #[test]
    fn accepted_count_matches_separated_timestamps() {
        let mut d = debouncer();
        let edges = [0, 10, 20, 250, 300, 460, 461, 900, 1_099, 1_101];
        let accepted = edges
            .iter()
            .filter(|&&t| d.on_edge(InputSource::JoystickPress, t).is_some())
            .count();
        // 0, 250, 460, 900, 1101
        assert_eq!(accepted, 5);
    }

    #[test]
    fn per_source_clocks_are_independent() {
        let mut d = debouncer();
        assert!(d.on_edge(InputSource::ButtonA, 100).is_some());
        assert!(d.on_edge(InputSource::ButtonB, 110).is_some());
        assert!(d.on_edge(InputSource::JoystickPress, 120).is_some());
    }

    #[test]
    fn shared_clock_gates_all_sources() {
        let mut d = Debouncer::new(200, ClockPolicy::Shared, 8);
        assert!(d.on_edge(InputSource::ButtonA, 100).is_some());
        assert!(d.on_edge(InputSource::ButtonB, 110).is_none());
        assert!(d.on_edge(InputSource::JoystickPress, 250).is_none());
        assert!(d.on_edge(InputSource::ButtonB, 301).is_some());
    }

    #[test]
    fn window_survives_clock_wrap() {
        let mut d = debouncer();
        assert!(d.on_edge(InputSource::ButtonA, u32::MAX - 50).is_some());
        assert!(d.on_edge(InputSource::ButtonA, 100).is_none());
        assert!(d.on_edge(InputSource::ButtonA, 150).is_some());
    }

    #[test]
    fn storm_counters_reset_on_acceptance() {
        let mut d = debouncer();
        d.on_edge(InputSource::ButtonA, 0);
        for t in 1..=10 {
            assert!(d.on_edge(InputSource::ButtonA, t).is_none());
        }
        assert_eq!(d.rejected(InputSource::ButtonA), 10);
        assert_eq!(d.rejected(InputSource::ButtonB), 0);
        assert_eq!(d.total_rejected(), 10);

        assert!(d.on_edge(InputSource::ButtonA, 500).is_some());
        assert_eq!(d.rejected(InputSource::ButtonA), 0);
        assert_eq!(d.total_rejected(), 10);
    }

    #[test]
    fn storm_warning_once_per_burst() {
        let mut d = debouncer();
        d.on_edge(InputSource::ButtonA, 0);
        for t in 1..8 {
            d.on_edge(InputSource::ButtonA, t);
        }
        assert_eq!(d.storm_warnings(), 0);

        // Eighth rejection warns, the rest of the burst stays quiet
        for t in 8..=40 {
            d.on_edge(InputSource::ButtonA, t);
        }
        assert_eq!(d.storm_warnings(), 1);

        // A new burst after an accepted edge warns again
        d.on_edge(InputSource::ButtonA, 1_000);
        for t in 1_001..=1_008 {
            d.on_edge(InputSource::ButtonA, t);
        }
        assert_eq!(d.storm_warnings(), 2);
    }
}
