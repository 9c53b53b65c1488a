//! Collision detection
//!
//! Exact AABB tests between the bird and every active pipe rectangle, plus
//! floor/ceiling checks. The overlap convention (touching edges do not
//! collide) lives on [`Rect::overlaps`]; nothing here re-decides it.
//! A collision is a normal game event, not an error: the caller turns the
//! `true` result into a phase transition.

use super::state::{Bird, PipePair};
use crate::tuning::Tuning;

/// True if the bird hits any pipe of any active pair, the floor, or the
/// ceiling.
pub fn check_collision(bird: &Bird, pipes: &[PipePair], tuning: &Tuning) -> bool {
    // Boundary checks: past the ceiling or through the floor
    if bird.y < 0.0 || bird.y + tuning.bird_h > tuning.playfield_h {
        return true;
    }

    let bounds = bird.bounds(tuning);
    pipes.iter().any(|pair| {
        bounds.overlaps(&pair.top_rect(tuning)) || bounds.overlaps(&pair.bottom_rect(tuning))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_at(x: f32, top_h: f32) -> PipePair {
        PipePair {
            id: 1,
            x,
            top_h,
            scored: false,
        }
    }

    #[test]
    fn ceiling_collision_after_one_upward_step() {
        // One upward step from the ceiling line: y=0, vel=-1, gravity 0.25
        // leaves vel -0.75 and y below 0
        let tuning = Tuning::default();
        let mut bird = Bird { y: 0.0, vel: -1.0 };
        bird.integrate(tuning.gravity);
        assert_eq!(bird.vel, -0.75);
        assert!(bird.y < 0.0);
        assert!(check_collision(&bird, &[], &tuning));
    }

    #[test]
    fn floor_collision() {
        let tuning = Tuning::default();
        let bird = Bird {
            y: tuning.playfield_h - tuning.bird_h + 1.0,
            vel: 0.0,
        };
        assert!(check_collision(&bird, &[], &tuning));

        // Resting exactly on the floor line is still inside
        let bird = Bird {
            y: tuning.playfield_h - tuning.bird_h,
            vel: 0.0,
        };
        assert!(!check_collision(&bird, &[], &tuning));
    }

    #[test]
    fn bird_inside_gap_does_not_collide() {
        let tuning = Tuning::default();
        // Gap spans [200, 320); bird fits comfortably inside it
        let pipes = [pair_at(tuning.bird_x, 200.0)];
        let bird = Bird { y: 250.0, vel: 0.0 };
        assert!(!check_collision(&bird, &pipes, &tuning));
    }

    #[test]
    fn bird_overlapping_top_pipe_collides() {
        let tuning = Tuning::default();
        let pipes = [pair_at(tuning.bird_x, 200.0)];
        // One unit into the top pipe
        let bird = Bird { y: 199.0, vel: 0.0 };
        assert!(check_collision(&bird, &pipes, &tuning));
    }

    #[test]
    fn edge_touch_with_pipe_is_not_a_collision() {
        let tuning = Tuning::default();
        let pipes = [pair_at(tuning.bird_x, 200.0)];
        // Bird top exactly at the top pipe's lower edge: zero overlap area
        let bird = Bird { y: 200.0, vel: 0.0 };
        assert!(!check_collision(&bird, &pipes, &tuning));

        // Pipe left edge exactly at the bird's right edge
        let pipes = [pair_at(tuning.bird_x + tuning.bird_w, 200.0)];
        let bird = Bird { y: 100.0, vel: 0.0 };
        assert!(!check_collision(&bird, &pipes, &tuning));
    }

    #[test]
    fn horizontally_clear_pair_does_not_collide() {
        let tuning = Tuning::default();
        let pipes = [pair_at(tuning.playfield_w, 200.0)];
        let bird = Bird { y: 100.0, vel: 0.0 };
        assert!(!check_collision(&bird, &pipes, &tuning));
    }
}
