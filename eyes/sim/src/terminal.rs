//! Terminal-backed eye display
//!
//! Stands in for the LED matrix. Every completed update is written as one
//! line: glyph codes for the two eye modules, or the visible 16-column window
//! of a scrolling message.

use std::collections::BTreeMap;
use std::io::{self, Write};

use robot_eyes_core::{EyeDisplay, EyeLayout, DISPLAY_COLUMNS};

/// Columns taken by one character of scrolled text, spacing included
pub const CHAR_COLUMNS: u16 = 6;

/// Pending content of the update being assembled
#[derive(Debug, Default)]
struct Frame {
    glyphs: BTreeMap<u8, u8>,
    text: Option<(String, i32)>,
    cleared: bool,
}

/// Eye display that prints to a writer
pub struct TerminalDisplay<W: Write> {
    out: W,
    layout: EyeLayout,
    frame: Frame,
    depth: u32,
    updates: u64,
    error: Option<io::Error>,
}

impl<W: Write> TerminalDisplay<W> {
    /// Display printing to `out`, labelling eyes by `layout`
    pub fn new(out: W, layout: EyeLayout) -> Self {
        Self {
            out,
            layout,
            frame: Frame::default(),
            depth: 0,
            updates: 0,
            error: None,
        }
    }

    /// Number of lines written so far
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// First write failure since the last call, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_frame(&mut self) {
        let frame = std::mem::take(&mut self.frame);
        let line = if let Some((text, column)) = &frame.text {
            format!("text |{}|", render_window(text, *column))
        } else if !frame.glyphs.is_empty() {
            let left = frame.glyphs.get(&self.layout.left_module());
            let right = frame.glyphs.get(&self.layout.right_module());
            format!("eyes L={} R={}", fmt_glyph(left), fmt_glyph(right))
        } else if frame.cleared {
            "clear".to_string()
        } else {
            return;
        };

        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            self.error = Some(e);
            return;
        }
        self.updates += 1;
    }
}

impl<W: Write> EyeDisplay for TerminalDisplay<W> {
    fn draw_glyph(&mut self, module: u8, glyph: u8) {
        self.frame.glyphs.insert(module, glyph);
        if self.depth == 0 {
            self.flush_frame();
        }
    }

    fn clear(&mut self) {
        self.frame = Frame {
            cleared: true,
            ..Frame::default()
        };
        if self.depth == 0 {
            self.flush_frame();
        }
    }

    fn begin_update(&mut self) {
        self.depth += 1;
    }

    fn end_update(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.flush_frame();
        }
    }

    fn draw_text(&mut self, text: &str, column: i32) {
        self.frame.text = Some((text.to_owned(), column));
        if self.depth == 0 {
            self.flush_frame();
        }
    }

    fn text_width(&self, text: &str) -> u16 {
        let chars = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        chars.saturating_mul(CHAR_COLUMNS)
    }
}

fn fmt_glyph(glyph: Option<&u8>) -> String {
    glyph.map_or_else(|| "--".to_string(), |g| format!("{g:02}"))
}

/// The visible columns of `text` placed at `column`
///
/// Each character fills its cell except the trailing spacing column.
fn render_window(text: &str, column: i32) -> String {
    let chars: Vec<char> = text.chars().collect();
    let cell = i32::from(CHAR_COLUMNS);
    (0..i32::from(DISPLAY_COLUMNS))
        .map(|x| {
            let offset = x - column;
            if offset < 0 || offset % cell == cell - 1 {
                return ' ';
            }
            usize::try_from(offset / cell)
                .ok()
                .and_then(|i| chars.get(i).copied())
                .unwrap_or(' ')
        })
        .collect()
}
