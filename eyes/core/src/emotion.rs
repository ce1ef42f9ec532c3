//! Emotion identifiers
//!
//! Each emotion names exactly one frame sequence in the
//! [`sequence`](crate::sequence) table. [`Emotion::None`] is a sentinel that
//! resolves to an empty sequence and is never offered to callers as a
//! selectable expression.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EyesError;

/// Expressions the eyes can animate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Emotion {
    /// No emotion; resolves to an empty sequence
    #[default]
    None = 0,
    /// Eyes open and centered
    Neutral,
    /// Both eyes blink
    Blink,
    /// One eye blinks
    Wink,
    /// Both eyes look left
    LookLeft,
    /// Both eyes look right
    LookRight,
    /// Both eyes look up
    LookUp,
    /// Both eyes look down
    LookDown,
    /// Angry brows (symmetrical)
    Angry,
    /// Sad brows (symmetrical)
    Sad,
    /// Evil brows (symmetrical)
    Evil,
    /// Evil brows (asymmetrical)
    EvilAsymmetric,
    /// Both eyes squint
    Squint,
    /// Crossed-out eyes
    Dead,
    /// Both eyes sweep up and down
    ScanVertical,
    /// Both eyes sweep left and right
    ScanHorizontal,
}

impl Emotion {
    /// Every emotion a caller may request, in identifier order
    pub const SELECTABLE: [Emotion; 15] = [
        Emotion::Neutral,
        Emotion::Blink,
        Emotion::Wink,
        Emotion::LookLeft,
        Emotion::LookRight,
        Emotion::LookUp,
        Emotion::LookDown,
        Emotion::Angry,
        Emotion::Sad,
        Emotion::Evil,
        Emotion::EvilAsymmetric,
        Emotion::Squint,
        Emotion::Dead,
        Emotion::ScanVertical,
        Emotion::ScanHorizontal,
    ];

    /// Numeric identifier of this emotion
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Resolve a numeric identifier
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::UnknownEmotionId`] if no emotion carries `id`.
    pub fn from_id(id: u8) -> Result<Self, EyesError> {
        if id == Emotion::None.id() {
            return Ok(Emotion::None);
        }
        Self::SELECTABLE
            .iter()
            .copied()
            .find(|e| e.id() == id)
            .ok_or(EyesError::UnknownEmotionId(id))
    }

    /// Whether this emotion can be requested by callers
    #[must_use]
    pub fn is_selectable(self) -> bool {
        self != Emotion::None
    }

    /// Kebab-case name, as used in configuration and on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Emotion::None => "none",
            Emotion::Neutral => "neutral",
            Emotion::Blink => "blink",
            Emotion::Wink => "wink",
            Emotion::LookLeft => "look-left",
            Emotion::LookRight => "look-right",
            Emotion::LookUp => "look-up",
            Emotion::LookDown => "look-down",
            Emotion::Angry => "angry",
            Emotion::Sad => "sad",
            Emotion::Evil => "evil",
            Emotion::EvilAsymmetric => "evil-asymmetric",
            Emotion::Squint => "squint",
            Emotion::Dead => "dead",
            Emotion::ScanVertical => "scan-vertical",
            Emotion::ScanHorizontal => "scan-horizontal",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Emotion {
    type Err = EyesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        std::iter::once(Emotion::None)
            .chain(Self::SELECTABLE)
            .find(|e| e.name() == normalized)
            .ok_or_else(|| EyesError::UnknownEmotion(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_declaration_order() {
        assert_eq!(Emotion::None.id(), 0);
        assert_eq!(Emotion::Neutral.id(), 1);
        assert_eq!(Emotion::ScanHorizontal.id(), 15);
        for (offset, emotion) in Emotion::SELECTABLE.iter().enumerate() {
            assert_eq!(usize::from(emotion.id()), offset + 1);
        }
    }

    #[test]
    fn test_from_id() {
        assert_eq!(Emotion::from_id(0).unwrap(), Emotion::None);
        assert_eq!(Emotion::from_id(4).unwrap(), Emotion::LookLeft);
        assert!(matches!(
            Emotion::from_id(200),
            Err(EyesError::UnknownEmotionId(200))
        ));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("look-left".parse::<Emotion>().unwrap(), Emotion::LookLeft);
        assert_eq!("EVIL_ASYMMETRIC".parse::<Emotion>().unwrap(), Emotion::EvilAsymmetric);
        assert_eq!(" blink ".parse::<Emotion>().unwrap(), Emotion::Blink);
        assert!(matches!(
            "grumpy".parse::<Emotion>(),
            Err(EyesError::UnknownEmotion(name)) if name == "grumpy"
        ));
    }

    #[test]
    fn test_display_matches_parse() {
        for emotion in Emotion::SELECTABLE {
            assert_eq!(emotion.to_string().parse::<Emotion>().unwrap(), emotion);
        }
    }

    #[test]
    fn test_none_is_not_selectable() {
        assert!(!Emotion::None.is_selectable());
        assert!(!Emotion::SELECTABLE.contains(&Emotion::None));
        assert!(Emotion::SELECTABLE.iter().all(|e| e.is_selectable()));
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            emotion: Emotion,
        }
        let text = toml::to_string(&Wrapper {
            emotion: Emotion::ScanVertical,
        })
        .unwrap();
        assert!(text.contains("\"scan-vertical\""));
        let back: Wrapper = toml::from_str(&text).unwrap();
        assert_eq!(back.emotion, Emotion::ScanVertical);
    }
}
