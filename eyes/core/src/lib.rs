//! Robot Eyes Core - Emotive LED-Matrix Eyes
//!
//! This crate animates a pair of LED-matrix "eyes" through emotions (blink,
//! look left, angry, sad, ...) and scrolls text across them. It owns the
//! timing and sequencing; the matrix driver and the millisecond clock are
//! collaborators it calls into.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Host polling loop                     │
//! │   configure_animation / request_text / advance()          │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼──────────────────────────────┐
//! │                    AnimationEngine                        │
//! │  ┌──────────────┐  ┌─────────────┐  ┌──────────────────┐ │
//! │  │ Sequence     │  │ BlinkPolicy │  │ TextScroller     │ │
//! │  │ Table        │  │ (jitter)    │  │                  │ │
//! │  └──────────────┘  └─────────────┘  └──────────────────┘ │
//! └───────────┬───────────────────────────────┬──────────────┘
//!             │                               │
//!      ┌──────┴──────┐                 ┌──────┴──────┐
//!      │ EyeDisplay  │                 │   Clock     │
//!      │ (driver)    │                 │ (ms ticks)  │
//!      └─────────────┘                 └─────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`AnimationEngine`]: the state machine, polled with `advance()`
//! - [`Emotion`]: expression identifiers
//! - [`Frame`] / [`Sequence`]: the static animation data
//! - [`EyeDisplay`] / [`Clock`]: what the host must provide
//! - [`EyesConfig`]: settings loaded from TOML and the environment
//!
//! # Quick Start
//!
//! ```ignore
//! use robot_eyes_core::{AnimationEngine, Emotion, SystemClock};
//!
//! let mut eyes = AnimationEngine::new(matrix, SystemClock::new(), 0);
//! eyes.configure_animation(Emotion::Blink, true, false);
//!
//! loop {
//!     if eyes.advance() {
//!         eyes.configure_animation(Emotion::LookLeft, true, false);
//!     }
//!     // other work, never blocking for long
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`emotion`]: emotion identifiers and their names
//! - [`sequence`]: frame sequences per emotion
//! - [`engine`]: the animation state machine
//! - [`blink`]: idle auto-blink timing
//! - [`text`]: scrolling text cursor
//! - [`display`]: display capability and eye module layout
//! - [`clock`]: clock capability and wraparound-safe elapsed time
//! - [`config`]: TOML and environment configuration
//! - [`error`]: error types
//! - [`test_utils`]: recording display for tests and tooling

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod blink;
pub mod clock;
pub mod config;
pub mod display;
pub mod emotion;
pub mod engine;
pub mod error;
pub mod sequence;
pub mod test_utils;
pub mod text;

pub use blink::BlinkPolicy;
pub use clock::{elapsed_ms, Clock, ManualClock, SystemClock};
pub use config::{load_config, load_config_from_path, ConfigError, ConfigSource, EyesConfig};
pub use display::{EyeDisplay, EyeLayout, DISPLAY_COLUMNS, EYE_COLUMNS, MAX_BASE_MODULE};
pub use emotion::Emotion;
pub use engine::{AnimState, AnimationEngine, Direction, PlaybackRequest, SETTLE_MS};
pub use error::EyesError;
pub use sequence::{lookup, lookup_id, Frame, Sequence, FRAME_TIME_MS};
