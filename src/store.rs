//! Ranking persistence collaborators
//!
//! The core never talks to a backend directly; it calls the [`IdentityStore`]
//! trait and treats every call as fallible. A dead backend degrades the game
//! to unranked play, it never interrupts it.
//!
//! Two implementations ship here: an in-memory store (tests and degraded
//! mode) and a JSON file store for the native binary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

/// One ranking row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub identity: String,
    pub score: u32,
}

/// Storage collaborator contract. All calls may fail; callers catch and
/// degrade rather than propagate into gameplay.
pub trait IdentityStore {
    /// Whether an identity already holds a ranking entry
    fn exists(&self, identity: &str) -> Result<bool, StoreError>;

    /// Persist a finalized session result
    fn record(&mut self, identity: &str, score: u32) -> Result<(), StoreError>;

    /// The top `n` entries, descending by score, ties broken by insertion
    /// order (earlier entry ranks higher)
    fn top_n(&self, n: usize) -> Result<Vec<ScoreEntry>, StoreError>;
}

/// Storage failure, reported but never fatal to gameplay
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Format(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O failed: {e}"),
            StoreError::Format(e) => write!(f, "storage data malformed: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Format(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Format(e)
    }
}

/// Order entries descending by score, preserving insertion order on ties.
fn ranked(entries: &[ScoreEntry], n: usize) -> Vec<ScoreEntry> {
    let mut ranked: Vec<ScoreEntry> = entries.to_vec();
    // Stable sort keeps insertion order within equal scores
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(n);
    ranked
}

/// In-memory store, insertion-ordered
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<ScoreEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryStore {
    fn exists(&self, identity: &str) -> Result<bool, StoreError> {
        Ok(self.entries.iter().any(|e| e.identity == identity))
    }

    fn record(&mut self, identity: &str, score: u32) -> Result<(), StoreError> {
        self.entries.push(ScoreEntry {
            identity: identity.to_string(),
            score,
        });
        Ok(())
    }

    fn top_n(&self, n: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(ranked(&self.entries, n))
    }
}

/// JSON-file-backed store for the native binary. The whole ranking is small,
/// so every record rewrites the file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Vec<ScoreEntry>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing entries if the file exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => {
                let entries: Vec<ScoreEntry> = serde_json::from_str(&json)?;
                info!("loaded {} ranking entries from {:?}", entries.len(), path);
                entries
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no ranking file at {path:?}, starting fresh");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl IdentityStore for JsonFileStore {
    fn exists(&self, identity: &str) -> Result<bool, StoreError> {
        Ok(self.entries.iter().any(|e| e.identity == identity))
    }

    fn record(&mut self, identity: &str, score: u32) -> Result<(), StoreError> {
        self.entries.push(ScoreEntry {
            identity: identity.to_string(),
            score,
        });
        // Keep memory consistent with the file: drop the entry if the write
        // failed, so `exists` never reports an identity the file lost.
        if let Err(e) = self.save() {
            self.entries.pop();
            return Err(e);
        }
        Ok(())
    }

    fn top_n(&self, n: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(ranked(&self.entries, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_exists_after_record() {
        let mut store = MemoryStore::new();
        assert!(!store.exists("alice").unwrap());
        store.record("alice", 9).unwrap();
        assert!(store.exists("alice").unwrap());
        assert!(!store.exists("bob").unwrap());
    }

    #[test]
    fn top_n_descends_with_insertion_order_ties() {
        let mut store = MemoryStore::new();
        store.record("alice", 5).unwrap();
        store.record("bob", 9).unwrap();
        store.record("carol", 5).unwrap();
        store.record("dave", 2).unwrap();

        let top = store.top_n(3).unwrap();
        let names: Vec<&str> = top.iter().map(|e| e.identity.as_str()).collect();
        // alice entered before carol, so alice outranks her at equal score
        assert_eq!(names, ["bob", "alice", "carol"]);
    }

    #[test]
    fn json_store_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.record("alice", 9).unwrap();
            store.record("bob", 4).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.exists("alice").unwrap());
        let top = store.top_n(10).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].identity, "alice");
        assert_eq!(top[0].score, 9);
    }

    #[test]
    fn failed_write_does_not_leave_a_phantom_entry() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory never created, so every save fails
        let path = dir.path().join("missing").join("ranking.json");
        let mut store = JsonFileStore::open(&path).unwrap();

        assert!(store.record("alice", 9).is_err());
        // The entry rolled back: memory agrees with the (absent) file
        assert!(!store.exists("alice").unwrap());
        assert!(store.top_n(10).unwrap().is_empty());
    }

    #[test]
    fn corrupt_ranking_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");
        fs::write(&path, "not json").unwrap();
        match JsonFileStore::open(&path) {
            Err(StoreError::Format(_)) => {}
            other => panic!("expected Format error, got {other:?}"),
        }
    }
}
