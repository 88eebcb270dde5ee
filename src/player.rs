//! Cursor-based playback over a materialized step sequence.
//!
//! The player owns its session state explicitly; nothing here is a process
//! global. Auto-play is modeled as a single cancelable deadline rather than
//! a background thread: while [`PlayerMode::Playing`], the host calls
//! [`StepPlayer::poll`] with the current instant and the player advances
//! whenever the armed deadline has passed, re-arming for the next advance.
//! At most one deadline exists at a time; `pause`, `load` and `reset` clear
//! it, so a stale tick can never double-advance a new run.

use std::time::{Duration, Instant};

use crate::graph::Graph;
use crate::step::StepRecord;

/// Slowest auto-advance rate.
pub const MAX_STEP_DELAY: Duration = Duration::from_millis(2000);
/// Fastest auto-advance rate.
pub const MIN_STEP_DELAY: Duration = Duration::from_millis(500);
/// Default auto-advance rate.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1000);

/// Player lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMode {
    /// No steps loaded.
    Idle,
    /// Steps present, not auto-advancing.
    Ready,
    /// Auto-advancing on a timer.
    Playing,
}

/// Holds one run's step list and a cursor over it.
#[derive(Debug, Clone)]
pub struct StepPlayer<S> {
    steps: Vec<S>,
    cursor: usize,
    mode: PlayerMode,
    delay: Duration,
    deadline: Option<Instant>,
}

impl<S: StepRecord> StepPlayer<S> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cursor: 0,
            mode: PlayerMode::Idle,
            delay: DEFAULT_STEP_DELAY,
            deadline: None,
        }
    }

    /// Replace the step list, rewinding to the first step and canceling any
    /// pending auto-advance. An empty list leaves the player [`PlayerMode::Idle`].
    pub fn load(&mut self, steps: Vec<S>) {
        self.mode = if steps.is_empty() {
            PlayerMode::Idle
        } else {
            PlayerMode::Ready
        };
        self.steps = steps;
        self.cursor = 0;
        self.deadline = None;
    }

    /// Advance the cursor. A no-op (returning `false`) at the last step.
    pub fn step_forward(&mut self) -> bool {
        if self.cursor + 1 < self.steps.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Rewind the cursor. A no-op (returning `false`) at the first step.
    pub fn step_backward(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Begin auto-advancing, arming the first deadline at `now + delay`.
    /// A no-op unless steps are loaded and the cursor is short of the end.
    pub fn play(&mut self, now: Instant) -> bool {
        if self.steps.is_empty() || self.cursor + 1 >= self.steps.len() {
            return false;
        }
        self.mode = PlayerMode::Playing;
        self.deadline = Some(now + self.delay);
        true
    }

    /// Stop auto-advancing, canceling the pending deadline.
    pub fn pause(&mut self) {
        if self.mode == PlayerMode::Playing {
            self.mode = PlayerMode::Ready;
        }
        self.deadline = None;
    }

    /// Drive auto-play: advances once if the armed deadline has passed,
    /// re-arming for the following step. Reaching the last step pauses the
    /// player. Returns `true` if the cursor moved.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.mode != PlayerMode::Playing {
            return false;
        }
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        let advanced = self.step_forward();
        if self.cursor + 1 >= self.steps.len() {
            self.pause();
        } else {
            self.deadline = Some(now + self.delay);
        }
        advanced
    }

    /// Discard the run: empty step list, cursor at 0, [`PlayerMode::Idle`],
    /// and the graph's annotations restored to their defaults.
    pub fn reset(&mut self, graph: &mut Graph) {
        self.steps.clear();
        self.cursor = 0;
        self.mode = PlayerMode::Idle;
        self.deadline = None;
        graph.reset_annotations();
    }

    pub fn current_step(&self) -> Option<&S> {
        self.steps.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn mode(&self) -> PlayerMode {
        self.mode
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Set the auto-advance delay, clamped to
    /// [`MIN_STEP_DELAY`]..=[`MAX_STEP_DELAY`].
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay.clamp(MIN_STEP_DELAY, MAX_STEP_DELAY);
    }
}

impl<S: StepRecord> Default for StepPlayer<S> {
    fn default() -> Self {
        Self::new()
    }
}
