//! Simulation state and core types
//!
//! One [`SimState`] exists per attempt and is rebuilt from [`SimState::new`]
//! at every restart; nothing from a previous attempt leaks across.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Phase of a single attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptPhase {
    /// Waiting for a confirm event to start
    Ready,
    /// Active gameplay
    Playing,
    /// Attempt ended by collision; score is final
    Over,
}

/// The controllable body: fixed x, vertical position and velocity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bird {
    /// Top of the bounding box
    pub y: f32,
    /// Vertical velocity, units/tick (positive = down)
    pub vel: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            y: tuning.bird_start_y,
            vel: 0.0,
        }
    }

    /// One fixed-tick Euler step: velocity first, then position with the
    /// updated velocity.
    pub fn integrate(&mut self, gravity: f32) {
        self.vel += gravity;
        self.y += self.vel;
    }

    /// A flap sets velocity to the impulse constant outright; impulses do not
    /// stack with current velocity.
    pub fn impulse(&mut self, impulse: f32) {
        self.vel = impulse;
    }

    /// Bounding box at the fixed horizontal position
    pub fn bounds(&self, tuning: &Tuning) -> Rect {
        Rect::new(tuning.bird_x, self.y, tuning.bird_w, tuning.bird_h)
    }
}

/// One top+bottom pipe pair: the atomic unit of spawn, score and recycle.
/// Gap height is fixed at generation time; the pair scrolls left as a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipePair {
    pub id: u32,
    /// Left edge of both pipes
    pub x: f32,
    /// Height of the top pipe; the gap starts directly below it
    pub top_h: f32,
    /// One-shot scoring latch, set the tick the pair is passed
    pub scored: bool,
}

impl PipePair {
    #[inline]
    pub fn right(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.pipe_w
    }

    /// Top pipe rectangle, spanning from the ceiling down to `top_h`
    pub fn top_rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.x, 0.0, tuning.pipe_w, self.top_h)
    }

    /// Bottom pipe rectangle, from below the gap down to the floor
    pub fn bottom_rect(&self, tuning: &Tuning) -> Rect {
        let top = self.top_h + tuning.gap;
        Rect::new(self.x, top, tuning.pipe_w, tuning.playfield_h - top)
    }
}

/// RNG state wrapper so a run is reproducible from its seed
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete per-attempt simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Attempt seed for reproducibility
    pub seed: u64,
    pub phase: AttemptPhase,
    pub bird: Bird,
    /// Active pairs, ordered left to right (spawn order)
    pub pipes: Vec<PipePair>,
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl SimState {
    /// Fresh state for one attempt. The first pair is not spawned here; the
    /// first tick's spawn trigger fires immediately on an empty sequence.
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            phase: AttemptPhase::Ready,
            bird: Bird::new(tuning),
            pipes: Vec::new(),
            score: 0,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a pair ID
    pub fn next_pair_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The most recently spawned pair (rightmost, since order is stable)
    pub fn last_spawned(&self) -> Option<&PipePair> {
        self.pipes.last()
    }
}
