//! Animation Engine
//!
//! The finite-state machine that walks an emotion's frame sequence over time
//! and renders it on the eyes. It never blocks: the host calls
//! [`AnimationEngine::advance`] from its polling loop, and each call performs
//! one state evaluation and at most one render, deciding everything by
//! comparing elapsed milliseconds against hold times.
//!
//! # States
//!
//! ```text
//!            request / blink due            sequence resolved
//!   ┌──────┐ ─────────────────► ┌─────────┐ ────────────────► ┌─────────┐
//!   │ Idle │                    │ Restart │                   │ Animate │
//!   └──────┘ ◄───────────────── └─────────┘                   └─────────┘
//!    │  ▲ ▲      empty sequence                                    │
//!    │  │ │                       settle floor    ┌───────┐  last frame held
//!    │  │ └────────────────────────────────────── │ Pause │ ◄──────┘
//!    │  │                                         └───────┘
//!    │  │ scrolled off  ┌──────┐
//!    │  └────────────── │ Text │
//!    └────────────────► └──────┘
//!        text pending
//! ```
//!
//! Requests never preempt an animation in flight; they wait for the next
//! Idle → Restart boundary. Text waits the same way.

use tracing::{debug, trace, warn};

use crate::blink::BlinkPolicy;
use crate::clock::{elapsed_ms, Clock};
use crate::config::EyesConfig;
use crate::display::{EyeDisplay, EyeLayout, MAX_BASE_MODULE};
use crate::emotion::Emotion;
use crate::error::EyesError;
use crate::sequence::{self, Frame, Sequence};
use crate::text::{ScrollStep, TextScroller};

/// How long the last frame stays up before the engine goes idle
pub const SETTLE_MS: u32 = 100;

/// Engine states
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimState {
    /// Nothing playing; waiting for a request, a blink, or text
    Idle,
    /// Loading the requested sequence
    Restart,
    /// Stepping through frames
    Animate,
    /// Holding the final frame before going idle
    Pause,
    /// Scrolling a message
    Text,
}

/// Direction of travel through a sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// First frame to last
    Forward,
    /// Last frame to first
    Reverse,
}

impl Direction {
    /// The opposite direction
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// A caller's request for the next animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackRequest {
    /// Emotion to play
    pub emotion: Emotion,
    /// Play the sequence back the other way once a forward pass ends
    pub auto_reverse: bool,
    /// Start from the last frame
    pub start_reversed: bool,
}

impl PlaybackRequest {
    /// Create a request
    #[must_use]
    pub const fn new(emotion: Emotion, auto_reverse: bool, start_reversed: bool) -> Self {
        Self {
            emotion,
            auto_reverse,
            start_reversed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Next,
    Flipped,
    Finished,
}

/// Position within the active sequence
#[derive(Clone, Debug)]
struct Playback {
    sequence: Sequence,
    index: usize,
    direction: Direction,
    reverse_pending: bool,
    shown_at: Option<u32>,
}

impl Playback {
    fn new(sequence: Sequence, request: PlaybackRequest) -> Self {
        let (index, direction) = if request.start_reversed {
            (sequence.len() - 1, Direction::Reverse)
        } else {
            (0, Direction::Forward)
        };
        Self {
            sequence,
            index,
            direction,
            reverse_pending: request.auto_reverse,
            shown_at: None,
        }
    }

    fn frame(&self) -> Option<Frame> {
        self.sequence.frame(self.index).copied()
    }

    fn step(&mut self) -> Step {
        let next = match self.direction {
            Direction::Forward => Some(self.index + 1).filter(|&i| i < self.sequence.len()),
            Direction::Reverse => self.index.checked_sub(1),
        };
        if let Some(index) = next {
            self.index = index;
            return Step::Next;
        }
        // Only a forward pass turns around; a reverse pass always ends.
        if self.reverse_pending && self.direction == Direction::Forward {
            // The boundary frame is shown again to start the return pass.
            self.reverse_pending = false;
            self.direction = self.direction.flipped();
            return Step::Flipped;
        }
        Step::Finished
    }
}

/// Drives the eyes through emotions, blinks and scrolling text
pub struct AnimationEngine<D, C> {
    display: D,
    clock: C,
    layout: EyeLayout,
    state: AnimState,
    pending: Option<PlaybackRequest>,
    playback: Option<Playback>,
    animation_started_ms: u32,
    pause_started_ms: u32,
    last_animation_ms: u32,
    blink: BlinkPolicy,
    pending_text: Option<String>,
    scroller: Option<TextScroller>,
    scroll_delay_ms: u16,
    eyes_shown: bool,
}

impl<D: EyeDisplay, C: Clock> AnimationEngine<D, C> {
    /// Engine with default settings, eyes starting at `base_module`
    pub fn new(display: D, clock: C, base_module: u8) -> Self {
        let mut config = EyesConfig::default();
        config.base_module = base_module;
        Self::with_config(display, clock, &config)
    }

    /// Engine configured from `config`
    ///
    /// A base module with no room after it for the left eye is clamped to
    /// [`MAX_BASE_MODULE`].
    pub fn with_config(display: D, clock: C, config: &EyesConfig) -> Self {
        let base_module = if config.base_module > MAX_BASE_MODULE {
            warn!(
                base_module = config.base_module,
                clamped = MAX_BASE_MODULE,
                "Base module leaves no room for the left eye, clamping"
            );
            MAX_BASE_MODULE
        } else {
            config.base_module
        };
        let blink = match config.seed {
            Some(seed) => BlinkPolicy::seeded(
                config.auto_blink,
                config.blink_min_interval_ms,
                config.blink_jitter_ms,
                seed,
            ),
            None => BlinkPolicy::new(
                config.auto_blink,
                config.blink_min_interval_ms,
                config.blink_jitter_ms,
            ),
        };
        let now = clock.now_ms();

        Self {
            display,
            clock,
            layout: EyeLayout::new(base_module),
            state: AnimState::Idle,
            pending: None,
            playback: None,
            animation_started_ms: now,
            pause_started_ms: now,
            last_animation_ms: now,
            blink,
            pending_text: None,
            scroller: None,
            scroll_delay_ms: config.scroll_delay_ms,
            eyes_shown: false,
        }
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Queue the next animation
    ///
    /// Replaces any request that has not started yet. An animation already
    /// playing runs to completion first.
    pub fn configure_animation(&mut self, emotion: Emotion, auto_reverse: bool, start_reversed: bool) {
        self.request(PlaybackRequest::new(emotion, auto_reverse, start_reversed));
    }

    /// Queue the next animation from a prepared request
    pub fn request(&mut self, request: PlaybackRequest) {
        debug!(
            emotion = %request.emotion,
            auto_reverse = request.auto_reverse,
            start_reversed = request.start_reversed,
            "Animation requested"
        );
        self.pending = Some(request);
    }

    /// Set the minimum idle time before an automatic blink
    pub fn configure_blink(&mut self, min_interval_ms: u16) {
        self.blink.set_min_interval(min_interval_ms);
    }

    /// Set the upper bound of the random delay added to the blink minimum
    pub fn configure_blink_jitter(&mut self, jitter_ms: u16) {
        self.blink.set_jitter(jitter_ms);
    }

    /// Turn idle blinking on or off
    pub fn enable_auto_blink(&mut self, enabled: bool) {
        self.blink.set_enabled(enabled);
    }

    /// Set the delay between text scroll steps
    pub fn set_scroll_delay(&mut self, delay_ms: u16) {
        self.scroll_delay_ms = delay_ms;
    }

    /// Queue a message to scroll across the eyes
    ///
    /// Returns `false` without changing anything if a message is already
    /// waiting or scrolling.
    pub fn request_text(&mut self, text: &str) -> bool {
        self.try_request_text(text).is_ok()
    }

    /// Queue a message to scroll across the eyes
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::TextBusy`] if a message is already waiting or
    /// scrolling.
    pub fn try_request_text(&mut self, text: &str) -> Result<(), EyesError> {
        if self.is_text_pending() {
            return Err(EyesError::TextBusy);
        }
        debug!(len = text.len(), "Text requested");
        self.pending_text = Some(text.to_owned());
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Polling
    // ------------------------------------------------------------------------

    /// Run one step of the state machine
    ///
    /// Returns `true` when the engine is idle with nothing queued, i.e. every
    /// requested animation and message has finished.
    pub fn advance(&mut self) -> bool {
        let now = self.clock.now_ms();
        match self.state {
            AnimState::Idle => self.run_idle(now),
            AnimState::Restart => self.run_restart(now),
            AnimState::Animate => self.run_animate(now),
            AnimState::Pause => self.run_pause(now),
            AnimState::Text => self.run_text(now),
        }
        self.is_idle()
    }

    fn run_idle(&mut self, now: u32) {
        if self.pending.is_some() {
            self.transition(AnimState::Restart);
            return;
        }

        if self.blink.is_due(elapsed_ms(now, self.last_animation_ms)) {
            debug!(threshold_ms = self.blink.threshold_ms(), "Idle blink");
            self.pending = Some(PlaybackRequest::new(Emotion::Blink, true, false));
            self.transition(AnimState::Restart);
            return;
        }

        if self.pending_text.is_some() {
            self.transition(AnimState::Text);
            return;
        }

        if !self.eyes_shown {
            let frame = sequence::neutral_frame();
            self.layout.draw_eyes(&mut self.display, frame.left, frame.right);
            self.eyes_shown = true;
            trace!("Neutral eyes drawn");
        }
    }

    fn run_restart(&mut self, now: u32) {
        let Some(request) = self.pending.take() else {
            self.transition(AnimState::Idle);
            return;
        };

        let sequence = sequence::lookup(request.emotion);
        if sequence.is_empty() {
            debug!(emotion = %request.emotion, "Nothing to animate");
            self.transition(AnimState::Idle);
            return;
        }

        self.playback = Some(Playback::new(sequence, request));
        self.animation_started_ms = now;
        self.transition(AnimState::Animate);
    }

    fn run_animate(&mut self, now: u32) {
        let Some(playback) = self.playback.as_mut() else {
            self.transition(AnimState::Idle);
            return;
        };

        if let Some(shown) = playback.shown_at {
            let hold = playback.frame().map_or(0, |f| u32::from(f.hold_ms));
            if elapsed_ms(now, shown) < hold {
                return;
            }
            if playback.step() == Step::Finished {
                self.pause_started_ms = now;
                self.transition(AnimState::Pause);
                return;
            }
        }

        let Some(frame) = playback.frame() else {
            self.transition(AnimState::Pause);
            return;
        };
        playback.shown_at = Some(now);
        trace!(
            index = playback.index,
            direction = ?playback.direction,
            left = frame.left,
            right = frame.right,
            "Frame"
        );
        self.layout.draw_eyes(&mut self.display, frame.left, frame.right);
        self.eyes_shown = true;
    }

    fn run_pause(&mut self, now: u32) {
        if elapsed_ms(now, self.pause_started_ms) < SETTLE_MS {
            return;
        }
        if let Some(playback) = self.playback.take() {
            debug!(
                emotion = %playback.sequence.emotion,
                duration_ms = elapsed_ms(now, self.animation_started_ms),
                "Animation complete"
            );
        }
        self.last_animation_ms = now;
        self.blink.arm();
        self.transition(AnimState::Idle);
    }

    fn run_text(&mut self, now: u32) {
        if let Some(scroller) = self.scroller.as_mut() {
            if scroller.step(&mut self.display, now, self.scroll_delay_ms) == ScrollStep::Finished {
                self.scroller = None;
                self.last_animation_ms = now;
                self.blink.arm();
                self.transition(AnimState::Idle);
            }
            return;
        }

        let Some(text) = self.pending_text.take() else {
            self.transition(AnimState::Idle);
            return;
        };
        self.scroller = Some(TextScroller::start(text, &mut self.display, now));
        self.eyes_shown = false;
    }

    fn transition(&mut self, next: AnimState) {
        trace!(from = ?self.state, to = ?next, "State transition");
        self.state = next;
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Current state
    pub fn state(&self) -> AnimState {
        self.state
    }

    /// Idle with no request and no message queued
    pub fn is_idle(&self) -> bool {
        self.state == AnimState::Idle && self.pending.is_none() && !self.is_text_pending()
    }

    /// Whether a message is waiting or scrolling
    pub fn is_text_pending(&self) -> bool {
        self.pending_text.is_some() || self.scroller.is_some()
    }

    /// Request that has not started yet
    pub fn pending_request(&self) -> Option<PlaybackRequest> {
        self.pending
    }

    /// Emotion of the sequence being played
    pub fn active_emotion(&self) -> Option<Emotion> {
        self.playback.as_ref().map(|p| p.sequence.emotion)
    }

    /// Frame on display from the active sequence
    pub fn current_frame(&self) -> Option<Frame> {
        self.playback
            .as_ref()
            .filter(|p| p.shown_at.is_some())
            .and_then(Playback::frame)
    }

    /// Index of the current frame in the active sequence
    pub fn frame_index(&self) -> Option<usize> {
        self.playback.as_ref().map(|p| p.index)
    }

    /// Direction of travel through the active sequence
    pub fn direction(&self) -> Option<Direction> {
        self.playback.as_ref().map(|p| p.direction)
    }

    /// Module placement of the eyes
    pub fn layout(&self) -> EyeLayout {
        self.layout
    }

    /// Idle blink settings
    pub fn blink_policy(&self) -> &BlinkPolicy {
        &self.blink
    }

    /// Delay between text scroll steps
    pub fn scroll_delay_ms(&self) -> u16 {
        self.scroll_delay_ms
    }

    /// The display collaborator
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The display collaborator, mutably
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// The clock collaborator
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Give back the collaborators
    pub fn into_parts(self) -> (D, C) {
        (self.display, self.clock)
    }
}

impl<D, C> std::fmt::Debug for AnimationEngine<D, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationEngine")
            .field("layout", &self.layout)
            .field("state", &self.state)
            .field("pending", &self.pending)
            .field("active", &self.playback.as_ref().map(|p| p.sequence.emotion))
            .field("text_pending", &(self.pending_text.is_some() || self.scroller.is_some()))
            .finish_non_exhaustive()
    }
}
