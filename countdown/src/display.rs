//! Remaining-time line for the character display.

use core::fmt::Write;
use heapless::String;

/// Where the line is drawn, in display coordinates.
pub const TEXT_ORIGIN: (i32, i32) = (0, 1);

/// Long enough for `u32::MAX` minutes.
pub type Line = String<24>;

/// Minimal text surface: wipe, draw, push to the panel.
pub trait TextDisplay {
    fn clear(&mut self);
    fn draw_text(&mut self, text: &str, x: i32, y: i32);
    fn flush(&mut self);
}

pub fn format_remaining(minutes: u32) -> Line {
    let mut line = Line::new();
    // Cannot overflow: the capacity fits the widest u32
    let _ = write!(line, "Tempo: {} min", minutes);
    line
}

pub fn show_remaining<D: TextDisplay>(display: &mut D, minutes: u32) {
    let line = format_remaining(minutes);
    display.clear();
    display.draw_text(&line, TEXT_ORIGIN.0, TEXT_ORIGIN.1);
    display.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes() {
        assert_eq!(format_remaining(7).as_str(), "Tempo: 7 min");
        assert_eq!(format_remaining(0).as_str(), "Tempo: 0 min");
        assert_eq!(format_remaining(125).as_str(), "Tempo: 125 min");
    }

    #[test]
    fn widest_value_fits() {
        assert_eq!(format_remaining(u32::MAX).as_str(), "Tempo: 4294967295 min");
    }

    #[derive(Default)]
    struct Panel {
        calls: [&'static str; 3],
        n: usize,
        text: Line,
        at: (i32, i32),
    }

    impl TextDisplay for Panel {
        fn clear(&mut self) {
            self.calls[self.n] = "clear";
            self.n += 1;
        }

        fn draw_text(&mut self, text: &str, x: i32, y: i32) {
            self.calls[self.n] = "draw";
            self.n += 1;
            self.text = Line::try_from(text).unwrap();
            self.at = (x, y);
        }

        fn flush(&mut self) {
            self.calls[self.n] = "flush";
            self.n += 1;
        }
    }

    #[test]
    fn refresh_clears_draws_and_flushes() {
        let mut panel = Panel::default();
        show_remaining(&mut panel, 42);
        assert_eq!(panel.calls, ["clear", "draw", "flush"]);
        assert_eq!(panel.text.as_str(), "Tempo: 42 min");
        assert_eq!(panel.at, TEXT_ORIGIN);
    }
}
