//! Input event queue
//!
//! Input sources run outside the tick (window callbacks, an autopilot, a
//! test script) and may only *queue* events here. The queue is drained into a
//! [`TickInput`] at the start of the next tick, so no input ever mutates
//! simulation state mid-step. Events are edge-triggered presses; holding a
//! key queues nothing extra.

use crate::sim::TickInput;

/// A discrete input event from the outside world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Upward impulse request (flap)
    Impulse,
    /// Start/restart confirmation
    Confirm,
}

/// Collects events between ticks and folds them into one [`TickInput`]
#[derive(Debug, Clone, Copy, Default)]
pub struct InputQueue {
    flap: bool,
    confirm: bool,
}

impl InputQueue {
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::Impulse => self.flap = true,
            InputEvent::Confirm => self.confirm = true,
        }
    }

    /// Take the pending input for this tick, clearing the one-shot flags.
    pub fn drain_tick(&mut self) -> TickInput {
        let input = TickInput {
            flap: self.flap,
            confirm: self.confirm,
        };
        *self = Self::default();
        input
    }
}
