//! Gatedash entry point
//!
//! Headless demo driver: binds an identity, lets a small autopilot play out a
//! full session on the fixed clock, and prints the resulting ranking. Real
//! rendering and windowing are external collaborators; here a log-based
//! renderer consumes the per-tick snapshots.

use std::error::Error;

use log::{info, warn};

use gatedash::app::{Game, Renderer, Snapshot};
use gatedash::clock::FixedClock;
use gatedash::input::InputEvent;
use gatedash::sim::AttemptPhase;
use gatedash::store::{IdentityStore, JsonFileStore, MemoryStore};
use gatedash::tuning::Tuning;

/// Renderer collaborator that logs score and phase changes
#[derive(Default)]
struct LogRenderer {
    last_score: u32,
    last_phase: Option<AttemptPhase>,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, snapshot: &Snapshot) {
        if snapshot.score != self.last_score {
            info!("score: {}", snapshot.score);
            self.last_score = snapshot.score;
        }
        if self.last_phase != Some(snapshot.phase) {
            info!(
                "phase: {:?} (attempt {}/{})",
                snapshot.phase, snapshot.attempts_used, snapshot.attempt_limit
            );
            self.last_phase = Some(snapshot.phase);
        }
    }
}

/// Flap whenever the bird sits below the center of the next gap
fn autopilot(game: &Game) -> bool {
    let tuning = game.tuning();
    let sim = game.sim();
    let gap_center = sim
        .pipes
        .iter()
        .find(|p| p.right(tuning) >= tuning.bird_x)
        .map(|p| p.top_h + tuning.gap / 2.0)
        .unwrap_or(tuning.playfield_h / 2.0);
    sim.bird.y + tuning.bird_h / 2.0 > gap_center && sim.bird.vel >= 0.0
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let identity = args.next().unwrap_or_else(|| "player1".to_string());
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(42);

    let store: Box<dyn IdentityStore> = match JsonFileStore::open("gatedash_ranking.json") {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("ranking file unusable ({e}); scores will not be saved");
            Box::new(MemoryStore::new())
        }
    };

    let mut game = Game::new(Tuning::default(), store, seed)?;
    if let Err(e) = game.bind_identity(&identity) {
        warn!("cannot bind {identity:?}: {e}");
        return Err(e.into());
    }

    let mut clock = FixedClock::default();
    let mut renderer = LogRenderer::default();
    // Autopilot fuel per attempt, so a lucky run still terminates
    let max_ticks_per_attempt: u64 = 60 * 50;

    while !game.tracker().is_finalized() {
        game.on_event(InputEvent::Confirm);
        loop {
            if game.sim().phase == AttemptPhase::Playing
                && game.sim().time_ticks < max_ticks_per_attempt
                && autopilot(&game)
            {
                game.on_event(InputEvent::Impulse);
            }
            clock.advance(clock.period(), || game.tick());
            renderer.draw(&game.snapshot());
            if game.sim().phase == AttemptPhase::Over {
                break;
            }
        }
    }

    clock.stop();
    let snapshot = game.snapshot();
    info!(
        "session finalized for {:?}: best score {}",
        identity,
        snapshot.last_best.unwrap_or(0)
    );
    println!("-- top scores --");
    for line in &snapshot.leaderboard {
        println!("{line}");
    }
    Ok(())
}
