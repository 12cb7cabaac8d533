//! Score bookkeeping and flat-file persistence
//!
//! Two files: a recent-scores list (newline-separated integers, most recent
//! first, capped at five entries, rewritten wholesale) and a high-score
//! scalar (single integer, overwritten only on improvement). Missing or
//! unreadable files are treated as empty/zero, never fatal.

use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::MAX_RECENT_SCORES;

const RECENT_FILE: &str = "scores.txt";
const HIGH_FILE: &str = "highscore.txt";

/// Recent scores and the all-time high score
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    /// Most recent first, at most [`MAX_RECENT_SCORES`] entries
    pub recent: Vec<u32>,
    pub high_score: u32,
    dir: PathBuf,
}

impl ScoreBoard {
    /// Load both files from `dir`, tolerating absence and garbage
    pub fn load(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let recent = load_recent(&dir.join(RECENT_FILE));
        let high_score = load_high(&dir.join(HIGH_FILE));
        log::info!(
            "Loaded {} recent scores, high score {}",
            recent.len(),
            high_score
        );
        Self {
            recent,
            high_score,
            dir,
        }
    }

    /// Prepend a finished run's score and rewrite the recent-scores file
    pub fn push_recent(&mut self, score: u32) {
        self.recent.insert(0, score);
        self.recent.truncate(MAX_RECENT_SCORES);
        let body: String = self.recent.iter().map(|s| format!("{s}\n")).collect();
        let path = self.dir.join(RECENT_FILE);
        if let Err(err) = fs::write(&path, body) {
            log::warn!("Failed to write {}: {}", path.display(), err);
        }
    }

    /// Record a new high score if `score` beats the stored value.
    /// Returns true when the file was updated.
    pub fn maybe_update_high(&mut self, score: u32) -> bool {
        if score <= self.high_score {
            return false;
        }
        self.high_score = score;
        let path = self.dir.join(HIGH_FILE);
        if let Err(err) = fs::write(&path, format!("{score}")) {
            log::warn!("Failed to write {}: {}", path.display(), err);
        }
        true
    }
}

fn load_recent(path: &Path) -> Vec<u32> {
    match fs::read_to_string(path) {
        Ok(body) => body
            .split_whitespace()
            .filter_map(|tok| tok.parse().ok())
            .take(MAX_RECENT_SCORES)
            .collect(),
        Err(err) => {
            log::warn!("No recent scores at {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

fn load_high(path: &Path) -> u32 {
    match fs::read_to_string(path) {
        Ok(body) => body.trim().parse().unwrap_or(0),
        Err(err) => {
            log::warn!("No high score at {}: {}", path.display(), err);
            0
        }
    }
}
