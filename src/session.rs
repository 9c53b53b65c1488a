//! Session and attempt state machine
//!
//! A session binds one identity to a bounded run of attempts:
//! `Unbound -> Bound -> Finalized`. Finalization happens automatically the
//! instant the attempt count reaches the limit: the best score is computed
//! and written to the ranking store exactly once. After that the session is
//! immutable history; the only way forward is binding a new identity.
//!
//! Storage is best-effort throughout. A backend failure degrades the session
//! to unranked play and is logged, never surfaced as a gameplay error.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::store::IdentityStore;

/// One completed play-through. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub score: u32,
}

/// A bound session: one identity, an append-only attempt list, a fixed limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub identity: String,
    pub attempts: Vec<Attempt>,
    pub limit: u32,
    pub finalized: bool,
}

impl Session {
    fn new(identity: String, limit: u32) -> Self {
        Self {
            identity,
            attempts: Vec::new(),
            limit,
            finalized: false,
        }
    }

    /// Best score across recorded attempts
    pub fn best(&self) -> Option<u32> {
        self.attempts.iter().map(|a| a.score).max()
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts.len() as u32
    }
}

/// Recoverable session-flow errors, surfaced to the caller for re-entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Empty or whitespace-only identity
    BlankIdentity,
    /// Identity already present in the ranking; caller should re-prompt
    IdentityTaken(String),
    /// No identity bound yet
    NotBound,
    /// All attempts used; a new identity must be bound first
    AttemptLimitReached,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::BlankIdentity => write!(f, "identity must not be blank"),
            SessionError::IdentityTaken(name) => write!(f, "identity {name:?} is already taken"),
            SessionError::NotBound => write!(f, "no identity bound"),
            SessionError::AttemptLimitReached => write!(f, "attempt limit reached"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Drives the `Unbound -> Bound -> Finalized` lifecycle
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    current: Option<Session>,
    /// Best score of the most recently finalized session, kept for display
    last_best: Option<u32>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn last_best(&self) -> Option<u32> {
        self.last_best
    }

    pub fn is_finalized(&self) -> bool {
        self.current.as_ref().is_some_and(|s| s.finalized)
    }

    /// Whether a new attempt may start right now
    pub fn can_start_attempt(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|s| !s.finalized && s.attempts_used() < s.limit)
    }

    /// Bind a candidate identity, superseding any current session.
    ///
    /// Blank identities and identities already on the ranking are rejected as
    /// recoverable errors. If the store cannot even answer `exists`, the bind
    /// proceeds unranked rather than blocking entry.
    pub fn bind(
        &mut self,
        identity: &str,
        limit: u32,
        store: &dyn IdentityStore,
    ) -> Result<(), SessionError> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(SessionError::BlankIdentity);
        }
        match store.exists(identity) {
            Ok(true) => return Err(SessionError::IdentityTaken(identity.to_string())),
            Ok(false) => {}
            Err(e) => {
                warn!("ranking store unavailable during bind ({e}); playing unranked");
            }
        }

        if let Some(old) = &self.current
            && !old.finalized
        {
            info!("superseding unfinished session for {:?}", old.identity);
        }
        info!("session bound to {identity:?} ({limit} attempts)");
        self.current = Some(Session::new(identity.to_string(), limit));
        Ok(())
    }

    /// Check that an attempt may start. Rejects rather than asserts: hitting
    /// the limit is a normal flow the caller answers by rebinding.
    pub fn start_attempt(&self) -> Result<(), SessionError> {
        let session = self.current.as_ref().ok_or(SessionError::NotBound)?;
        if session.finalized || session.attempts_used() >= session.limit {
            return Err(SessionError::AttemptLimitReached);
        }
        Ok(())
    }

    /// Record a completed attempt's score. If this was the last allowed
    /// attempt the session finalizes immediately; the finalized best score is
    /// returned when that happens.
    pub fn record_attempt(
        &mut self,
        score: u32,
        store: &mut dyn IdentityStore,
    ) -> Result<Option<u32>, SessionError> {
        let session = self.current.as_mut().ok_or(SessionError::NotBound)?;
        if session.finalized || session.attempts_used() >= session.limit {
            return Err(SessionError::AttemptLimitReached);
        }

        session.attempts.push(Attempt { score });
        debug_assert!(session.attempts_used() <= session.limit);
        info!(
            "attempt {}/{} for {:?} scored {score}",
            session.attempts_used(),
            session.limit,
            session.identity
        );

        if session.attempts_used() == session.limit {
            Ok(self.finalize(store))
        } else {
            Ok(None)
        }
    }

    /// Finalize the current session: compute the best score and write it to
    /// the store exactly once. Idempotent; a second invocation (e.g. a
    /// collision event firing the finalize path twice) performs no write.
    /// Finalizing before the attempt limit is a programming error and
    /// asserts in debug builds.
    pub fn finalize(&mut self, store: &mut dyn IdentityStore) -> Option<u32> {
        let session = self.current.as_mut()?;
        if session.finalized {
            return None;
        }
        debug_assert!(
            session.attempts_used() == session.limit,
            "finalize called before the attempt limit"
        );
        session.finalized = true;

        // A session only finalizes at the attempt limit, which is >= 1
        let best = session.best()?;
        self.last_best = Some(best);
        info!("session finalized for {:?}: best {best}", session.identity);

        if let Err(e) = store.record(&session.identity, best) {
            warn!("failed to persist ranking for {:?}: {e}", session.identity);
        }
        Some(best)
    }
}
