//! Deck navigator.
//!
//! A two-state machine: `Idle`, or `Transitioning` towards a deadline. The
//! caller supplies the current [`Instant`] to every operation and calls
//! [`DeckNavigator::poll`] once [`DeckNavigator::deadline`] has passed.

use std::time::{Duration, Instant};

use promptdeck_common_config::DeckConfig;
use thiserror::Error;

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Index reached from `index` in a deck of `len` cards, wrapping around.
    pub fn step(self, index: usize, len: usize) -> usize {
        match self {
            Direction::Next => (index + 1) % len,
            Direction::Prev => (index + len - 1) % len,
        }
    }
}

/// Navigator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning { direction: Direction, deadline: Instant },
}

/// Why an [`advance`](DeckNavigator::advance) was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdvanceRejected {
    #[error("a transition is already in progress")]
    Busy,
    #[error("the deck has no templates")]
    Empty,
}

/// Transition timing and displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigatorSettings {
    pub transition: Duration,
    pub swipe_offset: f32,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self::from(&DeckConfig::default())
    }
}

impl From<&DeckConfig> for NavigatorSettings {
    fn from(config: &DeckConfig) -> Self {
        Self {
            transition: config.transition(),
            swipe_offset: config.swipe_offset,
        }
    }
}

/// Where a card sits in the visual stack relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlacement {
    pub index: usize,
    /// `index - current_index`.
    pub position: isize,
    pub z_index: usize,
    pub translate_y: f32,
    pub scale: f32,
    pub visible: bool,
}

/// Tracks the current card and the transition in progress.
#[derive(Debug, Clone)]
pub struct DeckNavigator {
    current_index: usize,
    transition_offset: f32,
    phase: Phase,
    settings: NavigatorSettings,
}

impl DeckNavigator {
    /// Start at `start_index`, clamped into a deck of `len` cards.
    pub fn new(settings: NavigatorSettings, start_index: usize, len: usize) -> Self {
        Self {
            current_index: start_index.min(len.saturating_sub(1)),
            transition_offset: 0.0,
            phase: Phase::Idle,
            settings,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn transition_offset(&self) -> f32 {
        self.transition_offset
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// When the pending transition completes, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Transitioning { deadline, .. } => Some(deadline),
            Phase::Idle => None,
        }
    }

    /// Begin a transition. Returns its deadline.
    pub fn advance(
        &mut self,
        direction: Direction,
        now: Instant,
        len: usize,
    ) -> Result<Instant, AdvanceRejected> {
        if self.is_transitioning() {
            return Err(AdvanceRejected::Busy);
        }
        if len == 0 {
            return Err(AdvanceRejected::Empty);
        }

        let deadline = now + self.settings.transition;
        self.transition_offset = match direction {
            Direction::Next => -self.settings.swipe_offset,
            Direction::Prev => self.settings.swipe_offset,
        };
        self.phase = Phase::Transitioning { direction, deadline };

        tracing::trace!(?direction, from = self.current_index, "transition started");
        Ok(deadline)
    }

    /// Complete the transition if its deadline has passed.
    ///
    /// Returns the direction that completed.
    pub fn poll(&mut self, now: Instant, len: usize) -> Option<Direction> {
        let Phase::Transitioning { direction, deadline } = self.phase else {
            return None;
        };
        if now < deadline {
            return None;
        }

        if len > 0 {
            self.current_index = direction.step(self.current_index, len);
        }
        self.transition_offset = 0.0;
        self.phase = Phase::Idle;

        tracing::debug!(?direction, index = self.current_index, "transition complete");
        Some(direction)
    }

    /// Move straight to `index`. Only while idle and in range.
    pub fn jump_to(&mut self, index: usize, len: usize) -> bool {
        if self.is_transitioning() || index >= len {
            return false;
        }
        self.current_index = index;
        true
    }

    /// Tilt of the leaving card, in degrees.
    pub fn rotation_degrees(&self) -> f32 {
        self.transition_offset / 40.0
    }

    /// Layout of every card around the current one.
    pub fn stack_offsets(&self, len: usize) -> Vec<CardPlacement> {
        (0..len)
            .map(|index| {
                let position = index as isize - self.current_index as isize;
                let distance = position.unsigned_abs();
                let z_index = if position == 0 {
                    len + 1
                } else {
                    len.saturating_sub(distance)
                };

                CardPlacement {
                    index,
                    position,
                    z_index,
                    translate_y: position as f32 * -15.0,
                    scale: 1.0 - distance as f32 * 0.05,
                    visible: distance < 3,
                }
            })
            .collect()
    }
}
