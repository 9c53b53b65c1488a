//! Game wiring
//!
//! [`Game`] owns the session tracker, the per-attempt simulation, the input
//! queue and the ranking store, and exposes exactly one mutation path: the
//! tick. Rendering sees an immutable [`Snapshot`] built after the step
//! completes; input sources only queue events.

use log::info;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::input::{InputEvent, InputQueue};
use crate::session::{SessionError, SessionTracker};
use crate::sim::{self, AttemptPhase, Rect, RngState, SimState};
use crate::store::IdentityStore;
use crate::tuning::{ConfigError, Tuning};

/// How many leaderboard rows the snapshot carries
const LEADERBOARD_ROWS: usize = 10;

/// Read-only render view, rebuilt once per tick after the step
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub bird: Rect,
    pub bird_vel: f32,
    /// (top, bottom) rectangles per active pair, left to right
    pub pipes: Vec<(Rect, Rect)>,
    pub score: u32,
    pub phase: AttemptPhase,
    pub identity: Option<String>,
    pub attempts_used: u32,
    pub attempt_limit: u32,
    pub session_finalized: bool,
    /// Best score of the last finalized session
    pub last_best: Option<u32>,
    pub leaderboard: Vec<String>,
}

/// Rendering collaborator: consumes a snapshot, never mutates state
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot);
}

/// Top-level game: session lifecycle around a stream of attempts
pub struct Game {
    tuning: Tuning,
    tracker: SessionTracker,
    sim: SimState,
    rng: Pcg32,
    inputs: InputQueue,
    store: Box<dyn IdentityStore>,
    base_seed: u64,
    attempt_counter: u64,
}

impl Game {
    /// Build a game. Tuning is validated here: impossible obstacle geometry
    /// is fatal at startup, never clamped later.
    pub fn new(
        tuning: Tuning,
        store: Box<dyn IdentityStore>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let sim = SimState::new(seed, &tuning);
        let rng = RngState::new(seed).to_rng();
        Ok(Self {
            tuning,
            tracker: SessionTracker::new(),
            sim,
            rng,
            inputs: InputQueue::default(),
            store,
            base_seed: seed,
            attempt_counter: 0,
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    /// Bind a candidate identity. Identity conflicts and blank names come
    /// back as recoverable errors for the caller to re-prompt on.
    pub fn bind_identity(&mut self, identity: &str) -> Result<(), SessionError> {
        self.tracker
            .bind(identity, self.tuning.attempt_limit, self.store.as_ref())?;
        self.reset_attempt();
        Ok(())
    }

    /// Queue an input event; consumed at the start of the next tick.
    pub fn on_event(&mut self, event: InputEvent) {
        self.inputs.push(event);
    }

    /// One fixed-rate step: drain queued input, advance the attempt, and on
    /// the Playing -> Over edge hand the score to the session tracker.
    pub fn tick(&mut self) {
        let input = self.inputs.drain_tick();

        // Confirm starts the next attempt when one is allowed
        if input.confirm && self.sim.phase != AttemptPhase::Playing {
            match self.tracker.start_attempt() {
                Ok(()) => {
                    self.reset_attempt();
                    self.sim.phase = AttemptPhase::Playing;
                }
                Err(e) => info!("attempt not started: {e}"),
            }
        }

        let was_playing = self.sim.phase == AttemptPhase::Playing;
        sim::tick(&mut self.sim, input, &self.tuning, &mut self.rng);

        if was_playing && self.sim.phase == AttemptPhase::Over {
            // Collision ended the attempt; recording may finalize the session
            if let Err(e) = self
                .tracker
                .record_attempt(self.sim.score, self.store.as_mut())
            {
                info!("attempt not recorded: {e}");
            }
        }
    }

    /// Build the read-only render view. Leaderboard text is best-effort: an
    /// unavailable store yields a placeholder line, not an error.
    pub fn snapshot(&self) -> Snapshot {
        let session = self.tracker.session();
        Snapshot {
            bird: self.sim.bird.bounds(&self.tuning),
            bird_vel: self.sim.bird.vel,
            pipes: self
                .sim
                .pipes
                .iter()
                .map(|p| (p.top_rect(&self.tuning), p.bottom_rect(&self.tuning)))
                .collect(),
            score: self.sim.score,
            phase: self.sim.phase,
            identity: session.map(|s| s.identity.clone()),
            attempts_used: session.map(|s| s.attempts_used()).unwrap_or(0),
            attempt_limit: self.tuning.attempt_limit,
            session_finalized: self.tracker.is_finalized(),
            last_best: self.tracker.last_best(),
            leaderboard: self.leaderboard_lines(),
        }
    }

    fn leaderboard_lines(&self) -> Vec<String> {
        match self.store.top_n(LEADERBOARD_ROWS) {
            Ok(entries) => entries
                .iter()
                .enumerate()
                .map(|(i, e)| format!("{:>2}. {:<16} {:>5}", i + 1, e.identity, e.score))
                .collect(),
            Err(_) => vec!["ranking unavailable".to_string()],
        }
    }

    fn reset_attempt(&mut self) {
        self.attempt_counter += 1;
        let seed = self.base_seed.wrapping_add(self.attempt_counter);
        self.sim = SimState::new(seed, &self.tuning);
        self.rng = RngState::new(seed).to_rng();
    }
}
