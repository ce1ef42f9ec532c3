//! Display capability
//!
//! The eyes occupy two adjacent LED-matrix modules somewhere in a chain. The
//! engine addresses them through [`EyeDisplay`], which the matrix driver
//! implements; glyph bitmaps and pixel addressing stay on the driver's side.
//!
//! ```text
//!   module:   base + 1      base + 0
//!           ┌──────────┐  ┌──────────┐
//!           │ left eye │  │ right eye│
//!           └──────────┘  └──────────┘
//!   column:   0 ..  7       8 .. 15
//! ```

/// Number of LED columns in one eye module
pub const EYE_COLUMNS: u16 = 8;

/// Number of columns across both eyes
pub const DISPLAY_COLUMNS: u16 = EYE_COLUMNS * 2;

/// Module offset of the left eye from the base module
pub const LEFT_MODULE_OFFSET: u8 = 1;

/// Module offset of the right eye from the base module
pub const RIGHT_MODULE_OFFSET: u8 = 0;

/// Highest base module that still leaves room for the left eye
pub const MAX_BASE_MODULE: u8 = u8::MAX - LEFT_MODULE_OFFSET;

/// Drawing operations the engine needs from the matrix driver
pub trait EyeDisplay {
    /// Draw eye glyph `glyph` on matrix module `module`
    fn draw_glyph(&mut self, module: u8, glyph: u8);

    /// Blank the two eye modules
    fn clear(&mut self);

    /// Hold back refreshes until [`end_update`](Self::end_update)
    fn begin_update(&mut self) {}

    /// Push everything drawn since [`begin_update`](Self::begin_update)
    fn end_update(&mut self) {}

    /// Draw `text` with its first column at `column`
    ///
    /// Column 0 is the left edge of the left eye. Negative columns and
    /// columns at or past [`DISPLAY_COLUMNS`] fall outside the eyes and are
    /// clipped by the driver.
    fn draw_text(&mut self, text: &str, column: i32);

    /// Width of `text` in columns, spacing included
    fn text_width(&self, text: &str) -> u16;
}

/// Where the two eyes sit in the module chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EyeLayout {
    base_module: u8,
}

impl EyeLayout {
    /// Layout with the right eye on `base_module`
    #[must_use]
    pub const fn new(base_module: u8) -> Self {
        Self { base_module }
    }

    /// First module of the pair
    #[must_use]
    pub const fn base_module(self) -> u8 {
        self.base_module
    }

    /// Module showing the left eye
    #[must_use]
    pub const fn left_module(self) -> u8 {
        self.base_module.wrapping_add(LEFT_MODULE_OFFSET)
    }

    /// Module showing the right eye
    #[must_use]
    pub const fn right_module(self) -> u8 {
        self.base_module.wrapping_add(RIGHT_MODULE_OFFSET)
    }

    /// Draw a glyph pair as one refresh
    pub fn draw_eyes<D: EyeDisplay + ?Sized>(self, display: &mut D, left: u8, right: u8) {
        display.begin_update();
        display.draw_glyph(self.left_module(), left);
        display.draw_glyph(self.right_module(), right);
        display.end_update();
    }
}
