//! Fixed timestep simulation tick
//!
//! One call advances exactly one 20 ms step. Input is a snapshot of the
//! events queued since the previous tick; nothing mutates state mid-tick
//! from outside.

use log::debug;
use rand::Rng;

use super::collision::check_collision;
use super::score::update_score;
use super::spawn::spawn_pair;
use super::state::{AttemptPhase, SimState};
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap impulse requested since the last tick
    pub flap: bool,
    /// Confirm/restart requested since the last tick (consumed by the app
    /// layer to start attempts; a lone confirm does nothing mid-flight)
    pub confirm: bool,
}

/// Advance the attempt by one fixed timestep.
///
/// Ready and Over states are frozen: the attempt only moves while Playing,
/// and the tick that detects a collision is the last one to touch the state.
pub fn tick<R: Rng>(state: &mut SimState, input: TickInput, tuning: &Tuning, rng: &mut R) {
    if state.phase != AttemptPhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Queued input is applied at the start of the step
    if input.flap {
        state.bird.impulse(tuning.impulse);
    }
    state.bird.integrate(tuning.gravity);

    // Scroll the world
    for pair in state.pipes.iter_mut() {
        pair.x -= tuning.pipe_speed;
    }

    // Score before recycling: a pair that leaves the field this tick has been
    // counted long before its right edge reaches x = 0.
    state.score += update_score(&mut state.pipes, tuning);

    // Recycle pairs fully past the left boundary
    state.pipes.retain(|pair| pair.right(tuning) > 0.0);

    // Distance-based spawn trigger: a new pair appears once the previous one
    // has scrolled `spawn_spacing` in from the spawn edge (or immediately on
    // an empty field, which covers the first tick of every attempt).
    let due = match state.last_spawned() {
        None => true,
        Some(last) => last.x <= tuning.playfield_w - tuning.spawn_spacing,
    };
    if due {
        spawn_pair(state, tuning, rng);
    }

    if check_collision(&state.bird, &state.pipes, tuning) {
        state.phase = AttemptPhase::Over;
        debug!(
            "attempt over at tick {} with score {}",
            state.time_ticks, state.score
        );
    }
}
