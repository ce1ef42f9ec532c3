//! Test Utilities
//!
//! A recording [`EyeDisplay`] for exercising the engine without hardware.
//! Every call is appended to an operation log, and the helpers turn that log
//! back into the glyph pairs and text positions a viewer would have seen.
//!
//! # Usage
//!
//! ```ignore
//! use robot_eyes_core::clock::ManualClock;
//! use robot_eyes_core::test_utils::RecordingDisplay;
//! use robot_eyes_core::AnimationEngine;
//!
//! let clock = ManualClock::default();
//! let mut engine = AnimationEngine::new(RecordingDisplay::new(), clock.clone(), 0);
//! engine.advance();
//! assert_eq!(engine.display().eye_frames(engine.layout()), vec![(0, 0)]);
//! ```

use std::collections::HashMap;

use crate::display::{EyeDisplay, EyeLayout};

/// Default glyph advance for text, five columns plus one of spacing
pub const DEFAULT_CHAR_WIDTH: u16 = 6;

/// One recorded display call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayOp {
    /// `draw_glyph`
    Glyph {
        /// Target module
        module: u8,
        /// Glyph code
        glyph: u8,
    },
    /// `clear`
    Clear,
    /// `begin_update`
    BeginUpdate,
    /// `end_update`
    EndUpdate,
    /// `draw_text`
    Text {
        /// Text drawn
        text: String,
        /// Column of the first character
        column: i32,
    },
}

/// Display that records instead of drawing
#[derive(Clone, Debug)]
pub struct RecordingDisplay {
    ops: Vec<DisplayOp>,
    char_width: u16,
    modules: HashMap<u8, u8>,
}

impl RecordingDisplay {
    /// Recorder with the default character width
    #[must_use]
    pub fn new() -> Self {
        Self::with_char_width(DEFAULT_CHAR_WIDTH)
    }

    /// Recorder reporting `char_width` columns per character
    #[must_use]
    pub fn with_char_width(char_width: u16) -> Self {
        Self {
            ops: Vec::new(),
            char_width,
            modules: HashMap::new(),
        }
    }

    /// Every call so far
    #[must_use]
    pub fn ops(&self) -> &[DisplayOp] {
        &self.ops
    }

    /// Forget recorded calls
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// Glyph currently on `module`, if any
    #[must_use]
    pub fn glyph_on(&self, module: u8) -> Option<u8> {
        self.modules.get(&module).copied()
    }

    /// Number of refreshes that drew glyphs
    #[must_use]
    pub fn glyph_render_count(&self) -> usize {
        Self::eye_frames_from(&self.ops, None).len()
    }

    /// `(left, right)` glyph pairs in the order they were pushed
    #[must_use]
    pub fn eye_frames(&self, layout: EyeLayout) -> Vec<(u8, u8)> {
        Self::eye_frames_from(&self.ops, Some(layout))
    }

    /// Text columns in the order they were drawn
    #[must_use]
    pub fn text_columns(&self) -> Vec<i32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DisplayOp::Text { column, .. } => Some(*column),
                _ => None,
            })
            .collect()
    }

    fn eye_frames_from(ops: &[DisplayOp], layout: Option<EyeLayout>) -> Vec<(u8, u8)> {
        let mut frames = Vec::new();
        let mut left = None;
        let mut right = None;
        let mut touched = false;
        for op in ops {
            match op {
                DisplayOp::Glyph { module, glyph } => {
                    touched = true;
                    match layout {
                        Some(l) if *module == l.left_module() => left = Some(*glyph),
                        Some(l) if *module == l.right_module() => right = Some(*glyph),
                        _ => {}
                    }
                }
                DisplayOp::EndUpdate if touched => {
                    frames.push((left.unwrap_or_default(), right.unwrap_or_default()));
                    touched = false;
                }
                _ => {}
            }
        }
        frames
    }
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl EyeDisplay for RecordingDisplay {
    fn draw_glyph(&mut self, module: u8, glyph: u8) {
        self.modules.insert(module, glyph);
        self.ops.push(DisplayOp::Glyph { module, glyph });
    }

    fn clear(&mut self) {
        self.modules.clear();
        self.ops.push(DisplayOp::Clear);
    }

    fn begin_update(&mut self) {
        self.ops.push(DisplayOp::BeginUpdate);
    }

    fn end_update(&mut self) {
        self.ops.push(DisplayOp::EndUpdate);
    }

    fn draw_text(&mut self, text: &str, column: i32) {
        self.ops.push(DisplayOp::Text {
            text: text.to_string(),
            column,
        });
    }

    fn text_width(&self, text: &str) -> u16 {
        let chars = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        chars.saturating_mul(self.char_width)
    }
}
