//! The built-in 5x5 LED matrix standing in for the serpentine pixel chain.
//!
//! The controller shifts out 25 packed color words per frame. `BoardMatrix`
//! undoes the serpentine addressing and shows the frame as a greyscale image
//! on the non-blocking display, which is refreshed from the TIMER1 interrupt.

use countdown::matrix::{Channel, MatrixTransport, CELLS, SERPENTINE};
use critical_section_lock_mut::LockMut;
use microbit::{
    display::nonblocking::{Display, GreyscaleImage},
    hal::pac::TIMER1,
};

static DISPLAY: LockMut<Display<TIMER1>> = LockMut::new();

const MAX_BRIGHTNESS: u8 = 9;

pub fn init(display: Display<TIMER1>) {
    DISPLAY.init(display);
}

/// Called from the TIMER1 interrupt.
pub fn handle_display_event() {
    DISPLAY.with_lock(|display| display.handle_display_event());
}

pub struct BoardMatrix {
    grid: [[u8; 5]; 5],
    next: usize,
    // Channel value that maps to full brightness
    full_scale: u8,
}

impl BoardMatrix {
    pub fn new(full_scale: u8) -> Self {
        Self {
            grid: [[0; 5]; 5],
            next: 0,
            full_scale: full_scale.max(1),
        }
    }

    fn brightness(&self, word: u32) -> u8 {
        let level = [Channel::Red, Channel::Green, Channel::Blue]
            .iter()
            .map(|channel| channel.extract(word))
            .max()
            .unwrap_or(0);
        let scaled = u16::from(level) * u16::from(MAX_BRIGHTNESS) / u16::from(self.full_scale);
        scaled.min(u16::from(MAX_BRIGHTNESS)) as u8
    }
}

impl MatrixTransport for BoardMatrix {
    fn push(&mut self, word: u32) {
        let cell = SERPENTINE[CELLS - 1 - self.next];
        self.grid[cell / 5][cell % 5] = self.brightness(word);

        self.next += 1;
        if self.next == CELLS {
            self.next = 0;
            let image = GreyscaleImage::new(&self.grid);
            DISPLAY.with_lock(|display| display.show(&image));
        }
    }
}
