//! Sequence Table
//!
//! Static frame sequences for every [`Emotion`]. Each frame pairs a glyph code
//! for the left and right eye with a hold duration. Glyph codes index the eye
//! font held by the display driver; this crate never sees the bitmaps.
//!
//! Symmetric motions store only their forward half. A blink, for example, is
//! the eye *closing*; the engine replays the frames backward to open it again.
//! Reverse playback and auto-reverse therefore need no mirrored data.

use crate::emotion::Emotion;

/// Basic unit of time a frame is displayed, in milliseconds
pub const FRAME_TIME_MS: u16 = 100;

/// Glyph for an open eye looking straight ahead
pub const GLYPH_NEUTRAL: u8 = 0;

const FT: u16 = FRAME_TIME_MS;

/// One timed step of an animation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Glyph code for the left eye
    pub left: u8,
    /// Glyph code for the right eye
    pub right: u8,
    /// How long the frame stays up before the next one
    pub hold_ms: u16,
}

impl Frame {
    /// Create a frame
    #[must_use]
    pub const fn new(left: u8, right: u8, hold_ms: u16) -> Self {
        Self {
            left,
            right,
            hold_ms,
        }
    }

    /// Frame showing the same glyph on both eyes
    #[must_use]
    pub const fn both(glyph: u8, hold_ms: u16) -> Self {
        Self::new(glyph, glyph, hold_ms)
    }
}

/// Ordered frames for one emotion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sequence {
    /// Emotion this sequence animates
    pub emotion: Emotion,
    /// Frames in forward order
    pub frames: &'static [Frame],
}

impl Sequence {
    /// The zero-length sequence
    pub const EMPTY: Sequence = Sequence {
        emotion: Emotion::None,
        frames: &[],
    };

    /// Number of frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there is nothing to animate
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, if in range
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Sum of all hold durations for a single pass
    #[must_use]
    pub fn total_hold_ms(&self) -> u32 {
        self.frames.iter().map(|f| u32::from(f.hold_ms)).sum()
    }
}

// ============================================================================
// Sequence data
// ============================================================================

static SEQ_NEUTRAL: [Frame; 1] = [Frame::both(GLYPH_NEUTRAL, FT)];

static SEQ_BLINK: [Frame; 6] = [
    Frame::both(0, FT / 2),
    Frame::both(1, FT / 2),
    Frame::both(2, FT / 2),
    Frame::both(3, FT / 2),
    Frame::both(4, FT / 2),
    Frame::both(5, FT),
];

// Right eye stays open
static SEQ_WINK: [Frame; 6] = [
    Frame::new(0, 0, FT / 2),
    Frame::new(1, 0, FT / 2),
    Frame::new(2, 0, FT / 2),
    Frame::new(3, 0, FT / 2),
    Frame::new(4, 0, FT / 2),
    Frame::new(5, 0, FT * 2),
];

static SEQ_LOOK_LEFT: [Frame; 4] = [
    Frame::both(0, FT),
    Frame::both(6, FT),
    Frame::both(7, FT),
    Frame::both(8, FT * 5),
];

static SEQ_LOOK_RIGHT: [Frame; 4] = [
    Frame::both(0, FT),
    Frame::both(9, FT),
    Frame::both(10, FT),
    Frame::both(11, FT * 5),
];

static SEQ_LOOK_UP: [Frame; 4] = [
    Frame::both(0, FT),
    Frame::both(12, FT),
    Frame::both(13, FT),
    Frame::both(14, FT * 5),
];

static SEQ_LOOK_DOWN: [Frame; 4] = [
    Frame::both(0, FT),
    Frame::both(15, FT),
    Frame::both(16, FT),
    Frame::both(17, FT * 5),
];

// Brow glyphs are mirrored, so each eye has its own set.
static SEQ_ANGRY: [Frame; 5] = [
    Frame::both(0, FT),
    Frame::new(18, 22, FT),
    Frame::new(19, 23, FT),
    Frame::new(20, 24, FT),
    Frame::new(21, 25, FT * 5),
];

static SEQ_SAD: [Frame; 5] = [
    Frame::both(0, FT),
    Frame::new(26, 30, FT),
    Frame::new(27, 31, FT),
    Frame::new(28, 32, FT),
    Frame::new(29, 33, FT * 5),
];

static SEQ_EVIL: [Frame; 3] = [
    Frame::both(0, FT),
    Frame::new(34, 36, FT),
    Frame::new(35, 37, FT * 5),
];

// Evil brow on the left, angry brow on the right
static SEQ_EVIL_ASYMMETRIC: [Frame; 5] = [
    Frame::both(0, FT),
    Frame::new(38, 22, FT),
    Frame::new(39, 23, FT),
    Frame::new(40, 24, FT),
    Frame::new(41, 25, FT * 5),
];

static SEQ_SQUINT: [Frame; 4] = [
    Frame::both(0, FT),
    Frame::both(42, FT),
    Frame::both(43, FT),
    Frame::both(44, FT * 5),
];

static SEQ_DEAD: [Frame; 4] = [
    Frame::both(45, FT * 5),
    Frame::both(46, FT * 5),
    Frame::both(45, FT * 5),
    Frame::both(46, FT * 5),
];

static SEQ_SCAN_VERTICAL: [Frame; 6] = [
    Frame::both(47, FT),
    Frame::both(48, FT),
    Frame::both(49, FT),
    Frame::both(50, FT),
    Frame::both(51, FT),
    Frame::both(52, FT),
];

static SEQ_SCAN_HORIZONTAL: [Frame; 4] = [
    Frame::both(53, FT),
    Frame::both(54, FT),
    Frame::both(55, FT),
    Frame::both(56, FT),
];

/// Resolve an emotion to its sequence
///
/// [`Emotion::None`] resolves to [`Sequence::EMPTY`].
#[must_use]
pub fn lookup(emotion: Emotion) -> Sequence {
    let frames: &'static [Frame] = match emotion {
        Emotion::None => return Sequence::EMPTY,
        Emotion::Neutral => &SEQ_NEUTRAL,
        Emotion::Blink => &SEQ_BLINK,
        Emotion::Wink => &SEQ_WINK,
        Emotion::LookLeft => &SEQ_LOOK_LEFT,
        Emotion::LookRight => &SEQ_LOOK_RIGHT,
        Emotion::LookUp => &SEQ_LOOK_UP,
        Emotion::LookDown => &SEQ_LOOK_DOWN,
        Emotion::Angry => &SEQ_ANGRY,
        Emotion::Sad => &SEQ_SAD,
        Emotion::Evil => &SEQ_EVIL,
        Emotion::EvilAsymmetric => &SEQ_EVIL_ASYMMETRIC,
        Emotion::Squint => &SEQ_SQUINT,
        Emotion::Dead => &SEQ_DEAD,
        Emotion::ScanVertical => &SEQ_SCAN_VERTICAL,
        Emotion::ScanHorizontal => &SEQ_SCAN_HORIZONTAL,
    };
    Sequence { emotion, frames }
}

/// Resolve a raw emotion identifier to its sequence
///
/// Unmapped identifiers resolve to [`Sequence::EMPTY`].
#[must_use]
pub fn lookup_id(id: u8) -> Sequence {
    Emotion::from_id(id).map_or(Sequence::EMPTY, lookup)
}

/// The frame shown while idle
#[must_use]
pub fn neutral_frame() -> Frame {
    SEQ_NEUTRAL[0]
}
