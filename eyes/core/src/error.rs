//! Error types for the eyes engine
//!
//! Animation itself never fails: unresolvable emotions degrade to idle and
//! clock wraparound is absorbed arithmetically. The errors here cover the
//! edges where a caller can be told "no".

use thiserror::Error;

/// Errors reported by the eyes engine and its helpers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EyesError {
    /// A text request is already pending or scrolling
    #[error("text display busy: a previous message is still pending or scrolling")]
    TextBusy,

    /// An emotion name did not match any known emotion
    #[error("unknown emotion: {0:?}")]
    UnknownEmotion(String),

    /// A numeric emotion identifier did not match any known emotion
    #[error("unknown emotion identifier: {0}")]
    UnknownEmotionId(u8),
}
