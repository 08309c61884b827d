//! Three-pin RGB status LED.

use embedded_hal::digital::OutputPin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorColor {
    Off,
    Red,
    Green,
    Blue,
}

impl IndicatorColor {
    /// (red, green, blue) pin levels.
    pub const fn levels(self) -> (bool, bool, bool) {
        match self {
            IndicatorColor::Off => (false, false, false),
            IndicatorColor::Red => (true, false, false),
            IndicatorColor::Green => (false, true, false),
            IndicatorColor::Blue => (false, false, true),
        }
    }
}

pub trait Indicator {
    fn show(&mut self, color: IndicatorColor);
}

pub struct RgbIndicator<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> RgbIndicator<R, G, B> {
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self { red, green, blue }
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool) {
    let _ = if on { pin.set_high() } else { pin.set_low() };
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> Indicator for RgbIndicator<R, G, B> {
    fn show(&mut self, color: IndicatorColor) {
        let (r, g, b) = color.levels();
        drive(&mut self.red, r);
        drive(&mut self.green, g);
        drive(&mut self.blue, b);
    }
}
