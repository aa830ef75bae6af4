//! High score leaderboard
//!
//! One entry per player name, holding that player's best score. Persisted as
//! a JSON array sorted descending by score.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, RecordStore, StorageError};

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    /// Best score for this name
    pub score: u64,
    /// Local date the best score was set
    pub date: String,
}

/// High score leaderboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Record storage key
    const STORAGE_KEY: &'static str = "quantum_leaderboard";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a score for `name`.
    ///
    /// New names are inserted; known names are only updated when the new
    /// score is strictly higher. Returns the 1-indexed rank when the board
    /// changed.
    pub fn record(&mut self, name: &str, score: u64, date: &str) -> Option<usize> {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) if score > entry.score => {
                entry.score = score;
                entry.date = date.to_string();
            }
            Some(_) => return None,
            None => self.entries.push(LeaderboardEntry {
                name: name.to_string(),
                score,
                date: date.to_string(),
            }),
        }

        self.sort();
        self.rank_of(name)
    }

    /// 1-indexed position of `name`
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name).map(|i| i + 1)
    }

    pub fn best_for(&self, name: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.score)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    fn sort(&mut self) {
        // Stable: ties keep insertion order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }

    /// Load from the store. Missing or corrupt records give an empty board.
    pub fn load(store: &dyn RecordStore) -> Self {
        match persistence::load_json::<Leaderboard>(store, Self::STORAGE_KEY) {
            Some(mut board) => {
                board.sort();
                log::info!("Loaded {} leaderboard entries", board.entries.len());
                board
            }
            None => {
                log::info!("No leaderboard found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut dyn RecordStore) -> Result<(), StorageError> {
        persistence::save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }
}
