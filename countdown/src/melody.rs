//! Expiry melody, bit-banged as a square wave on a plain output pin.

use embedded_hal::{delay::DelayNs, digital::OutputPin};

pub const DO: u32 = 261;
pub const RE: u32 = 293;
pub const MI: u32 = 329;
pub const FA: u32 = 349;
pub const SOL: u32 = 392;
pub const LA: u32 = 440;
pub const SI: u32 = 493;
pub const DO_OCTAVE: u32 = 523;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl Note {
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    /// Number of full high/low periods that fit in the note.
    pub const fn cycles(&self) -> u32 {
        self.frequency_hz * self.duration_ms / 1000
    }

    /// Zero for a rest.
    pub const fn half_period_us(&self) -> u32 {
        if self.frequency_hz == 0 {
            0
        } else {
            500_000 / self.frequency_hz
        }
    }
}

/// Up the scale and back down, holding the top and the final note.
pub const EXPIRY_MELODY: [Note; 15] = [
    Note::new(DO, 400),
    Note::new(RE, 400),
    Note::new(MI, 400),
    Note::new(FA, 400),
    Note::new(SOL, 400),
    Note::new(LA, 400),
    Note::new(SI, 400),
    Note::new(DO_OCTAVE, 800),
    Note::new(SI, 400),
    Note::new(LA, 400),
    Note::new(SOL, 400),
    Note::new(FA, 400),
    Note::new(MI, 400),
    Note::new(RE, 400),
    Note::new(DO, 800),
];

pub struct MelodyPlayer<P> {
    speaker: P,
}

impl<P: OutputPin> MelodyPlayer<P> {
    pub fn new(speaker: P) -> Self {
        Self { speaker }
    }

    /// Blocks for the whole note.
    pub fn play_note<D: DelayNs>(&mut self, delay: &mut D, note: &Note) {
        if note.frequency_hz == 0 {
            delay.delay_ms(note.duration_ms);
            return;
        }

        let half_period = note.half_period_us();
        for _ in 0..note.cycles() {
            let _ = self.speaker.set_high();
            delay.delay_us(half_period);
            let _ = self.speaker.set_low();
            delay.delay_us(half_period);
        }
    }

    pub fn play<D: DelayNs>(&mut self, delay: &mut D, melody: &[Note]) {
        for note in melody {
            self.play_note(delay, note);
        }
    }

    pub fn release(self) -> P {
        self.speaker
    }
}
