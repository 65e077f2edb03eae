//! High score leaderboard system
//!
//! Persisted as JSON in a key-value store, tracks the top 10 scores.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, StorageError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Maximum characters in a leaderboard name
pub const MAX_NAME_LEN: usize = 8;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name (uppercase alphanumeric, at most 8 chars)
    pub name: String,
    /// Player's score
    pub score: u64,
    /// Round reached
    pub round: u32,
}

/// Normalize a player-typed name for the leaderboard.
///
/// Keeps ASCII letters and digits, truncates to [`MAX_NAME_LEN`] and uppercases.
/// Returns `None` when nothing usable is left.
pub fn normalize_name(raw: &str) -> Option<String> {
    let name: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(MAX_NAME_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    (!name.is_empty()).then_some(name)
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key for the persisted list
    pub const STORAGE_KEY: &'static str = "zombie_blade_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry; ties keep the older entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if the name is empty
    /// after normalization or the score didn't qualify.
    pub fn add_score(&mut self, name: &str, score: u64, round: u32) -> Option<usize> {
        let name = normalize_name(name)?;
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { name, score, round };

        // Insert before the first strictly lower score: ties rank after the
        // older entry, and a zero score still fits while the board is short
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a store.
    ///
    /// Missing or corrupt data yields an empty leaderboard; it never fails.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let json = match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                return Self::new();
            }
            Err(e) => {
                log::warn!("High scores unavailable ({e}), starting fresh");
                return Self::new();
            }
        };

        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                // Stored data may have been edited by hand; restore the invariants
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Discarding corrupt high scores: {e}");
                Self::new()
            }
        }
    }

    /// Save high scores to a store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
