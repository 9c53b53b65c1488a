//! Gatedash - a side-scrolling gap-runner with a ranked session ladder
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `session`: Bounded-attempt session state machine and finalization
//! - `store`: Ranking persistence collaborators
//! - `clock`: Fixed-rate tick driver
//! - `app`: Wiring of session + simulation + store behind one event loop
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod clock;
pub mod input;
pub mod session;
pub mod sim;
pub mod store;
pub mod tuning;

pub use app::{Game, Renderer, Snapshot};
pub use session::{SessionError, SessionTracker};
pub use store::{IdentityStore, JsonFileStore, MemoryStore, StoreError};
pub use tuning::{ConfigError, Tuning};
