//! High score leaderboard
//!
//! Top 10 scores kept for the life of the process; persisted to a JSON
//! file on native so repeated runs accumulate a board. The sim itself
//! only carries the single high-score scalar — this layer lives at the
//! driver boundary.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final session score
    pub score: u64,
    /// Fixed ticks survived
    pub ticks_survived: u64,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score (if it qualifies). Returns the rank achieved.
    pub fn add_score(&mut self, score: u64, ticks_survived: u64, timestamp: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, ticks_survived, timestamp };
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
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard from a JSON file, starting fresh on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(err) => {
                    log::warn!("High score file unreadable ({err}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save the leaderboard as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
