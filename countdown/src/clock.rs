//! Millisecond time base and the minute cadence built on top of it.
//!
//! Time comes from a free-running hardware counter (RTC0 on the micro:bit,
//! 24 bits at 32 768 Hz), so it keeps counting while interrupts are masked.
//! `MillisClock` widens the counter into a 64-bit tick total and converts it
//! to milliseconds. The total lives behind a critical section because both
//! the edge interrupt and the main loop read the clock.

use core::cell::Cell;
use critical_section::Mutex;

#[derive(Debug, Clone, Copy)]
struct Widened {
    last_raw: u32,
    ticks: u64,
}

pub struct MillisClock {
    mask: u32,
    tick_hz: u32,
    widened: Mutex<Cell<Widened>>,
}

impl MillisClock {
    /// Clock over a `counter_bits` wide counter running at `tick_hz`, which
    /// must read zero when the clock is created.
    pub const fn new(counter_bits: u32, tick_hz: u32) -> Self {
        let mask = if counter_bits >= 32 {
            u32::MAX
        } else {
            (1 << counter_bits) - 1
        };
        Self {
            mask,
            tick_hz,
            widened: Mutex::new(Cell::new(Widened {
                last_raw: 0,
                ticks: 0,
            })),
        }
    }

    /// Milliseconds since the counter started, wrapping after ~49 days.
    ///
    /// `read_counter` runs inside the critical section so that two contexts
    /// never fold in samples out of order. The clock has to be read at least
    /// once per counter period (512 s for RTC0) or a wrap goes unnoticed.
    pub fn now_ms(&self, read_counter: impl FnOnce() -> u32) -> u32 {
        critical_section::with(|cs| {
            let cell = self.widened.borrow(cs);
            let mut widened = cell.get();
            let raw = read_counter() & self.mask;
            widened.ticks += u64::from(raw.wrapping_sub(widened.last_raw) & self.mask);
            widened.last_raw = raw;
            cell.set(widened);
            (widened.ticks * 1000 / u64::from(self.tick_hz)) as u32
        })
    }
}

/// `now` is at or past `deadline`, tolerating one wrap of the counter.
pub fn reached(now_ms: u32, deadline_ms: u32) -> bool {
    now_ms.wrapping_sub(deadline_ms) < u32::MAX / 2
}

/// Deadline for the once-a-minute decrement.
///
/// Runs next to the fast poll cadence instead of blocking it: the main loop
/// asks `poll` on every tick and only gets `true` once per elapsed period.
#[derive(Debug, Clone, Copy)]
pub struct MinuteCadence {
    period_ms: u32,
    deadline_ms: Option<u32>,
}

impl MinuteCadence {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            deadline_ms: None,
        }
    }

    pub fn arm(&mut self, now_ms: u32) {
        self.deadline_ms = Some(now_ms.wrapping_add(self.period_ms));
    }

    pub fn disarm(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u32> {
        self.deadline_ms
    }

    pub fn poll(&mut self, now_ms: u32) -> bool {
        match self.deadline_ms {
            Some(deadline) if reached(now_ms, deadline) => {
                self.deadline_ms = Some(deadline.wrapping_add(self.period_ms));
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_rtc_ticks_to_milliseconds() {
        let clock = MillisClock::new(24, 32_768);
        assert_eq!(clock.now_ms(|| 0), 0);
        assert_eq!(clock.now_ms(|| 32_768), 1_000);
        assert_eq!(clock.now_ms(|| 32_768 * 60), 60_000);
        // Sub-millisecond ticks are kept, not rounded away
        assert_eq!(clock.now_ms(|| 32_768 * 60 + 16), 60_000);
        assert_eq!(clock.now_ms(|| 32_768 * 60 + 33), 60_001);
    }

    #[test]
    fn counter_wrap_keeps_counting() {
        let clock = MillisClock::new(24, 32_768);
        let period = 1u32 << 24;
        assert_eq!(clock.now_ms(|| period - 32_768), 511_000);
        // Counter rolled over to 32 768
        assert_eq!(clock.now_ms(|| 32_768), 513_000);
        // Bits above the counter width are ignored
        assert_eq!(clock.now_ms(|| period | 65_536), 514_000);
    }

    #[test]
    fn full_width_counter() {
        let clock = MillisClock::new(32, 1_000);
        assert_eq!(clock.now_ms(|| u32::MAX), u32::MAX);
        // 10 ticks later, past the u32 millisecond wrap
        assert_eq!(clock.now_ms(|| 9), 9);
    }

    #[test]
    fn reached_handles_wraparound() {
        assert!(reached(100, 100));
        assert!(reached(101, 100));
        assert!(!reached(99, 100));
        assert!(reached(5, u32::MAX - 5));
        assert!(!reached(u32::MAX - 5, 5));
    }

    #[test]
    fn unarmed_cadence_never_fires() {
        let mut cadence = MinuteCadence::new(60_000);
        assert!(!cadence.poll(0));
        assert!(!cadence.poll(1_000_000));
    }

    #[test]
    fn fires_once_per_period() {
        let mut cadence = MinuteCadence::new(60_000);
        cadence.arm(1_000);
        assert!(!cadence.poll(60_800));
        assert!(cadence.poll(61_000));
        assert!(!cadence.poll(61_200));
        assert_eq!(cadence.deadline_ms(), Some(121_000));
        assert!(cadence.poll(121_100));
    }

    #[test]
    fn disarm_clears_deadline() {
        let mut cadence = MinuteCadence::new(60_000);
        cadence.arm(0);
        cadence.disarm();
        assert!(!cadence.is_armed());
        assert!(!cadence.poll(120_000));
    }
}
