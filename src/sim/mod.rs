//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable obstacle order (left to right)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::check_collision;
pub use rect::Rect;
pub use score::update_score;
pub use spawn::{pick_top_height, spawn_pair};
pub use state::{AttemptPhase, Bird, PipePair, RngState, SimState};
pub use tick::{TickInput, tick};
