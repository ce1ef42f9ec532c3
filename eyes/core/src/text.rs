//! Scrolling text cursor
//!
//! Text enters from the right edge of the eyes and moves one column left per
//! step until its last column has left the left edge.

use crate::clock::elapsed_ms;
use crate::display::{EyeDisplay, DISPLAY_COLUMNS};

/// Default delay between scroll steps
pub const DEFAULT_SCROLL_DELAY_MS: u16 = 40;

/// Outcome of one scroll evaluation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollStep {
    /// Delay not yet elapsed; nothing drawn
    Waiting,
    /// Text moved and was redrawn
    Moved,
    /// Text has fully left the display
    Finished,
}

/// Position of a message scrolling across the eyes
#[derive(Clone, Debug)]
pub struct TextScroller {
    text: String,
    column: i32,
    width: i32,
    last_step_ms: u32,
}

impl TextScroller {
    /// Place `text` just past the right edge and draw it
    pub fn start<D: EyeDisplay + ?Sized>(text: String, display: &mut D, now_ms: u32) -> Self {
        let width = i32::from(display.text_width(&text));
        let scroller = Self {
            text,
            column: i32::from(DISPLAY_COLUMNS),
            width,
            last_step_ms: now_ms,
        };
        scroller.draw(display);
        scroller
    }

    /// Move one column if `delay_ms` has passed since the last move
    pub fn step<D: EyeDisplay + ?Sized>(
        &mut self,
        display: &mut D,
        now_ms: u32,
        delay_ms: u16,
    ) -> ScrollStep {
        if elapsed_ms(now_ms, self.last_step_ms) < u32::from(delay_ms) {
            return ScrollStep::Waiting;
        }
        self.last_step_ms = now_ms;
        self.column -= 1;
        if self.column + self.width <= 0 {
            return ScrollStep::Finished;
        }
        self.draw(display);
        ScrollStep::Moved
    }

    /// Column of the first character
    #[must_use]
    pub fn column(&self) -> i32 {
        self.column
    }

    /// Text being scrolled
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn draw<D: EyeDisplay + ?Sized>(&self, display: &mut D) {
        display.begin_update();
        display.clear();
        display.draw_text(&self.text, self.column);
        display.end_update();
    }
}
