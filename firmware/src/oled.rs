//! SSD1306 128x64 panel on the external I2C bus, used as the character display.

use countdown::TextDisplay;
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use log::warn;
use microbit::hal::{pac::TWIM0, twim::Twim};
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

type Panel =
    Ssd1306<I2CInterface<Twim<TWIM0>>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct Oled {
    panel: Panel,
}

impl Oled {
    pub fn new(i2c: Twim<TWIM0>) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        // A missing panel should not stop the timer itself
        if panel.init().is_err() {
            warn!("OLED did not answer on I2C, running without it");
        }
        Self { panel }
    }
}

impl TextDisplay for Oled {
    fn clear(&mut self) {
        self.panel.clear_buffer();
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.panel);
    }

    fn flush(&mut self) {
        let _ = self.panel.flush();
    }
}
