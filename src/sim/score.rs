//! Pass scoring
//!
//! A pair counts the tick its right edge crosses the bird's x. The `scored`
//! latch on each pair makes the count exactly-once per pair even when the
//! pair survives many more ticks, and independent per pair when several pairs
//! cross in the same tick under extreme speed settings.

use super::state::PipePair;
use crate::tuning::Tuning;

/// Mark newly passed pairs and return how many scored this tick.
pub fn update_score(pipes: &mut [PipePair], tuning: &Tuning) -> u32 {
    let mut delta = 0;
    for pair in pipes.iter_mut() {
        if !pair.scored && pair.right(tuning) < tuning.bird_x {
            pair.scored = true;
            delta += 1;
        }
    }
    delta
}
