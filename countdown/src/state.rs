//! Countdown state and the phase derived from it.

/// Minutes left on the countdown and whether it is running.
///
/// Decrements clamp at zero and increments saturate, so `remaining_minutes`
/// can never wrap in either direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerState {
    pub remaining_minutes: u32,
    pub is_active: bool,
}

/// Where the countdown currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    /// Active with nothing left; cleared by the next expiry check.
    Expired,
}

impl TimerState {
    pub const fn new() -> Self {
        Self {
            remaining_minutes: 0,
            is_active: false,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.is_active, self.remaining_minutes) {
            (false, _) => Phase::Idle,
            (true, 0) => Phase::Expired,
            (true, _) => Phase::Running,
        }
    }

    pub fn add_minutes(&mut self, minutes: u32) {
        self.remaining_minutes = self.remaining_minutes.saturating_add(minutes);
    }

    pub fn remove_minute(&mut self) {
        self.remaining_minutes = self.remaining_minutes.saturating_sub(1);
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn cancel(&mut self) {
        self.is_active = false;
    }

    /// Take one minute off a running countdown. Returns whether anything changed.
    pub fn tick_minute(&mut self) -> bool {
        if self.is_active && self.remaining_minutes > 0 {
            self.remaining_minutes -= 1;
            true
        } else {
            false
        }
    }

    /// One-shot expiry: stops a countdown that is active with nothing left.
    pub fn take_expiry(&mut self) -> bool {
        if self.phase() == Phase::Expired {
            self.is_active = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_empty() {
        let state = TimerState::new();
        assert_eq!(state, TimerState::default());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn remove_minute_clamps_at_zero() {
        let mut state = TimerState::new();
        for _ in 0..3 {
            state.remove_minute();
        }
        assert_eq!(state.remaining_minutes, 0);

        state.add_minutes(2);
        for _ in 0..5 {
            state.remove_minute();
        }
        assert_eq!(state.remaining_minutes, 0);
    }

    #[test]
    fn add_minutes_saturates() {
        let mut state = TimerState {
            remaining_minutes: u32::MAX - 1,
            is_active: false,
        };
        state.add_minutes(5);
        assert_eq!(state.remaining_minutes, u32::MAX);
    }

    #[test]
    fn tick_minute_only_while_running() {
        let mut state = TimerState {
            remaining_minutes: 2,
            is_active: false,
        };
        assert!(!state.tick_minute());
        assert_eq!(state.remaining_minutes, 2);

        state.activate();
        assert!(state.tick_minute());
        assert!(state.tick_minute());
        assert!(!state.tick_minute());
        assert_eq!(state.remaining_minutes, 0);
        assert_eq!(state.phase(), Phase::Expired);
    }

    #[test]
    fn expiry_is_one_shot() {
        let mut state = TimerState {
            remaining_minutes: 0,
            is_active: true,
        };
        assert!(state.take_expiry());
        assert!(!state.is_active);
        assert!(!state.take_expiry());
    }
}
