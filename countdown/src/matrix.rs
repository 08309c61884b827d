//! 5x5 pictograms for the LED matrix.
//!
//! The matrix is one chain of 25 pixels wired in a serpentine: even rows run
//! left to right, odd rows right to left. Frames are shifted out last pixel
//! first, so word `i` of a frame carries logical cell `SERPENTINE[24 - i]`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pictogram {
    /// Exclamation mark, shown on expiry
    Alert,
    /// Shown on cancel
    Check,
    /// Shown while counting down
    Ellipsis,
}

/// Color byte a frame is rendered into. One frame lights one channel only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Bit offset of the channel inside a packed word.
    pub const fn shift(self) -> u32 {
        match self {
            Channel::Green => 24,
            Channel::Red => 16,
            Channel::Blue => 8,
        }
    }

    pub const fn extract(self, word: u32) -> u8 {
        (word >> self.shift()) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCommand {
    pub pictogram: Pictogram,
    pub channel: Channel,
}

pub const CELLS: usize = 25;

pub const SERPENTINE: [usize; CELLS] = [
    0, 1, 2, 3, 4, //
    9, 8, 7, 6, 5, //
    10, 11, 12, 13, 14, //
    19, 18, 17, 16, 15, //
    20, 21, 22, 23, 24,
];

const ALERT: [[u8; 5]; 5] = [
    [0, 0, 1, 0, 0],
    [0, 0, 1, 0, 0],
    [0, 0, 1, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 0, 1, 0, 0],
];

const CHECK: [[u8; 5]; 5] = [
    [0, 0, 0, 0, 0],
    [1, 0, 0, 0, 1],
    [0, 1, 0, 1, 0],
    [0, 0, 1, 0, 0],
    [0, 0, 0, 0, 0],
];

const ELLIPSIS: [[u8; 5]; 5] = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 1, 1, 1, 0],
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
];

impl Pictogram {
    pub const fn pattern(self) -> &'static [[u8; 5]; 5] {
        match self {
            Pictogram::Alert => &ALERT,
            Pictogram::Check => &CHECK,
            Pictogram::Ellipsis => &ELLIPSIS,
        }
    }

    fn cell(self, index: usize) -> u8 {
        self.pattern()[index / 5][index % 5]
    }
}

/// Frame for `pictogram` in wire order, lit cells at `intensity` on `channel`.
pub fn render(pictogram: Pictogram, channel: Channel, intensity: u8) -> [u32; CELLS] {
    let mut frame = [0u32; CELLS];
    for (i, word) in frame.iter_mut().enumerate() {
        let level = pictogram.cell(SERPENTINE[CELLS - 1 - i]).saturating_mul(intensity);
        *word = u32::from(level) << channel.shift();
    }
    frame
}

/// Anything that takes packed color words one pixel at a time.
pub trait MatrixTransport {
    fn push(&mut self, word: u32);
}

pub struct LedMatrix<T> {
    transport: T,
    intensity: u8,
}

impl<T: MatrixTransport> LedMatrix<T> {
    pub fn new(transport: T, intensity: u8) -> Self {
        Self {
            transport,
            intensity,
        }
    }

    pub fn show(&mut self, command: RenderCommand) {
        for word in render(command.pictogram, command.channel, self.intensity) {
            self.transport.push(word);
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
