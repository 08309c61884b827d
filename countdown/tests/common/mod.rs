#![allow(dead_code)]

use countdown::{
    display,
    matrix::{self, CELLS},
    Channel, Config, Controller, Indicator, IndicatorColor, MatrixTransport, Pictogram,
    TextDisplay,
};

/// Keeps every flushed line.
#[derive(Debug, Default)]
pub struct Panel {
    pub flushed: Vec<String>,
    pending: String,
}

impl Panel {
    pub fn last(&self) -> Option<&str> {
        self.flushed.last().map(String::as_str)
    }
}

impl TextDisplay for Panel {
    fn clear(&mut self) {
        self.pending.clear();
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32) {
        self.pending.push_str(text);
    }

    fn flush(&mut self) {
        self.flushed.push(self.pending.clone());
    }
}

#[derive(Debug, Default)]
pub struct Frames {
    pub words: Vec<u32>,
}

impl Frames {
    pub fn count(&self) -> usize {
        self.words.len() / CELLS
    }

    pub fn last(&self) -> Option<&[u32]> {
        self.words.len().checked_sub(CELLS).map(|start| &self.words[start..])
    }

    pub fn last_is(&self, pictogram: Pictogram, channel: Channel) -> bool {
        self.last() == Some(&matrix::render(pictogram, channel, 50)[..])
    }
}

impl MatrixTransport for Frames {
    fn push(&mut self, word: u32) {
        self.words.push(word);
    }
}

#[derive(Debug, Default)]
pub struct Lamp {
    pub history: Vec<IndicatorColor>,
}

impl Lamp {
    pub fn current(&self) -> Option<IndicatorColor> {
        self.history.last().copied()
    }
}

impl Indicator for Lamp {
    fn show(&mut self, color: IndicatorColor) {
        self.history.push(color);
    }
}

pub type TestController = Controller<Frames, Lamp>;

pub fn controller_with(config: Config) -> TestController {
    Controller::new(config, Frames::default(), Lamp::default()).unwrap()
}

/// What the firmware's main loop does once it has left the lock.
pub fn draw_pending(minutes: Option<u32>, panel: &mut Panel) {
    if let Some(minutes) = minutes {
        display::show_remaining(panel, minutes);
    }
}

pub fn controller() -> TestController {
    controller_with(Config::default())
}
