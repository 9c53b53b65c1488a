//! Obstacle generation
//!
//! Gap placement is a pure function of the tuning constants and an injected
//! RNG, so tests can drive it with a seeded generator. The geometry
//! preconditions are enforced by [`Tuning::validate`] at startup; by the time
//! a pair is spawned the range below is guaranteed non-empty.

use rand::Rng;

use super::state::{PipePair, SimState};
use crate::tuning::Tuning;

/// Pick the top-pipe height uniformly in
/// `[min_clearance, playfield_h - gap - 2*min_clearance - buffer]`.
///
/// At the upper bound the bottom pipe still gets `2*min_clearance + buffer`
/// of height, so both pipes always keep at least `min_clearance`.
pub fn pick_top_height<R: Rng>(tuning: &Tuning, rng: &mut R) -> f32 {
    let lo = tuning.min_clearance;
    let hi = tuning.gap_span();
    debug_assert!(hi > lo, "tuning must be validated before spawning");
    rng.random_range(lo..=hi)
}

/// Spawn a new pair at the right playfield edge and append it to the active
/// sequence, keeping left-to-right order.
pub fn spawn_pair<R: Rng>(state: &mut SimState, tuning: &Tuning, rng: &mut R) {
    let top_h = pick_top_height(tuning, rng);
    let id = state.next_pair_id();
    state.pipes.push(PipePair {
        id,
        x: tuning.playfield_w,
        top_h,
        scored: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RngState;
    use proptest::prelude::*;

    #[test]
    fn reference_config_height_range() {
        // playfield 600, gap 120, clearance 50, buffer 50 -> top in [50, 330]
        let tuning = Tuning::default();
        let mut rng = RngState::new(7).to_rng();
        for _ in 0..1000 {
            let h = pick_top_height(&tuning, &mut rng);
            assert!((50.0..=330.0).contains(&h), "top height {h} out of range");
        }
    }

    #[test]
    fn spawned_pair_sits_at_the_right_edge() {
        let tuning = Tuning::default();
        let mut state = SimState::new(1, &tuning);
        let mut rng = RngState::new(1).to_rng();
        spawn_pair(&mut state, &tuning, &mut rng);
        spawn_pair(&mut state, &tuning, &mut rng);
        assert_eq!(state.pipes.len(), 2);
        assert_eq!(state.pipes[0].id, 1);
        assert_eq!(state.pipes[1].id, 2);
        assert_eq!(state.pipes[1].x, tuning.playfield_w);
        assert!(!state.pipes[1].scored);
    }

    proptest! {
        /// Both pipes keep their clearance and the pair partitions the
        /// playfield exactly, for any valid tuning and seed.
        #[test]
        fn clearances_hold_for_valid_tunings(
            playfield_h in 300.0f32..2000.0,
            gap in 60.0f32..200.0,
            min_clearance in 10.0f32..80.0,
            buffer in 0.0f32..80.0,
            seed in any::<u64>(),
        ) {
            let tuning = Tuning {
                playfield_h,
                gap,
                min_clearance,
                buffer,
                ..Tuning::default()
            };
            prop_assume!(tuning.gap_span() > tuning.min_clearance);

            let mut rng = RngState::new(seed).to_rng();
            let top_h = pick_top_height(&tuning, &mut rng);
            let bottom_h = tuning.playfield_h - top_h - tuning.gap;

            prop_assert!(top_h >= tuning.min_clearance);
            prop_assert!(bottom_h >= tuning.min_clearance);
            prop_assert!((top_h + tuning.gap + bottom_h - tuning.playfield_h).abs() < 1e-3);
        }
    }
}
