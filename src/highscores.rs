//! High score leaderboards
//!
//! One board per round count. Each player keeps a single entry on a board,
//! replaced only by a better score. Persisted to LocalStorage on the web;
//! in-memory natively.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Entries kept per board
pub const MAX_SCORES_PER_BOARD: usize = 5;

/// Name recorded when the player did not enter one
pub const GUEST_NAME: &str = "Guest";

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("failed to serialize scores: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("localStorage is not available")]
    StorageUnavailable,
    #[error("localStorage rejected the write: {0}")]
    StorageWrite(String),
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_name: String,
    pub score: u32,
    /// Rounds in the game this score was set in
    pub round_count: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// The score collaborator the game driver reports to
pub trait ScoreSink {
    /// Record a finished game
    fn add_score(&mut self, player_name: &str, score: u32, round_count: u32)
    -> Result<(), ScoreError>;

    /// Best entries for a round count, highest first
    fn top_scores(&self, round_count: u32) -> Vec<ScoreEntry>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    /// Boards keyed by round count, each sorted by score descending
    pub boards: BTreeMap<u32, Vec<ScoreEntry>>,
    /// Named players seen so far, in first-seen order
    pub players: Vec<String>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pawlympics_scores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score. Returns true if the board changed.
    pub fn record(
        &mut self,
        player_name: &str,
        score: u32,
        round_count: u32,
        timestamp: f64,
    ) -> bool {
        let name = player_name.trim();
        let name = if name.is_empty() { GUEST_NAME } else { name };

        if name != GUEST_NAME && !self.players.iter().any(|p| p == name) {
            self.players.push(name.to_string());
        }

        let entry = ScoreEntry {
            player_name: name.to_string(),
            score,
            round_count,
            timestamp,
        };

        let board = self.boards.entry(round_count).or_default();
        match board.iter_mut().find(|e| e.player_name == name) {
            Some(existing) if score > existing.score => *existing = entry,
            Some(_) => return false,
            None => board.push(entry),
        }

        sort_and_trim(board);
        board.iter().any(|e| e.player_name == name && e.score == score)
    }

    pub fn top(&self, round_count: u32) -> &[ScoreEntry] {
        self.boards
            .get(&round_count)
            .map(|b| &b[..b.len().min(MAX_SCORES_PER_BOARD)])
            .unwrap_or(&[])
    }

    /// Known players whose name contains `query`, ignoring case
    pub fn matching_players(&self, query: &str) -> Vec<&str> {
        let query = query.trim().to_lowercase();
        self.players
            .iter()
            .filter(|p| p.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }

    /// Fold another copy of the leaderboards into this one: best entry per
    /// player on each board, re-sorted and trimmed
    pub fn merge(&mut self, other: &HighScores) {
        for (round_count, entries) in &other.boards {
            let board = self.boards.entry(*round_count).or_default();
            for entry in entries {
                match board.iter_mut().find(|e| e.player_name == entry.player_name) {
                    Some(existing) if entry.score > existing.score => *existing = entry.clone(),
                    Some(_) => {}
                    None => board.push(entry.clone()),
                }
            }
            sort_and_trim(board);
        }

        for player in &other.players {
            if !self.players.contains(player) {
                self.players.push(player.clone());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.boards.values().all(Vec::is_empty)
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = local_storage()
            .ok()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|json| serde_json::from_str::<HighScores>(&json).ok());

        match stored {
            Some(scores) => {
                log::info!("Loaded high scores for {} round counts", scores.boards.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save to LocalStorage, merging with whatever another tab wrote since load
    #[cfg(target_arch = "wasm32")]
    pub fn save(&mut self) -> Result<(), ScoreError> {
        let storage = local_storage()?;
        if let Some(stored) = storage
            .get_item(Self::STORAGE_KEY)
            .ok()
            .flatten()
            .and_then(|json| serde_json::from_str::<HighScores>(&json).ok())
        {
            self.merge(&stored);
        }

        let json = serde_json::to_string(self)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| ScoreError::StorageWrite(format!("{e:?}")))?;
        log::info!("High scores saved");
        Ok(())
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&mut self) -> Result<(), ScoreError> {
        Ok(())
    }
}

impl ScoreSink for HighScores {
    fn add_score(
        &mut self,
        player_name: &str,
        score: u32,
        round_count: u32,
    ) -> Result<(), ScoreError> {
        if self.record(player_name, score, round_count, now_ms()) {
            log::info!("New best for {player_name} on {round_count} rounds: {score}");
        }
        self.save()
    }

    fn top_scores(&self, round_count: u32) -> Vec<ScoreEntry> {
        self.top(round_count).to_vec()
    }
}

fn sort_and_trim(board: &mut Vec<ScoreEntry>) {
    // Stable sort keeps the earlier entry ahead on ties
    board.sort_by(|a, b| b.score.cmp(&a.score));
    board.truncate(MAX_SCORES_PER_BOARD);
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, ScoreError> {
    web_sys::window()
        .ok_or(ScoreError::StorageUnavailable)?
        .local_storage()
        .map_err(|e| ScoreError::StorageWrite(format!("{e:?}")))?
        .ok_or(ScoreError::StorageUnavailable)
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_best_per_player() {
        let mut scores = HighScores::new();
        assert!(scores.record("Luna", 20, 5, 1.0));
        assert!(!scores.record("Luna", 10, 5, 2.0));
        assert!(scores.record("Luna", 35, 5, 3.0));

        let top = scores.top(5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].score, 35);
        assert_eq!(top[0].timestamp, 3.0);
    }

    #[test]
    fn test_boards_are_per_round_count() {
        let mut scores = HighScores::new();
        scores.record("Luna", 20, 3, 0.0);
        scores.record("Luna", 40, 5, 0.0);
        assert_eq!(scores.top(3)[0].score, 20);
        assert_eq!(scores.top(5)[0].score, 40);
        assert!(scores.top(7).is_empty());
    }

    #[test]
    fn test_board_sorted_and_capped() {
        let mut scores = HighScores::new();
        for (i, name) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            scores.record(name, (i as u32) * 5, 5, 0.0);
        }
        let top: Vec<u32> = scores.top(5).iter().map(|e| e.score).collect();
        assert_eq!(top, vec![30, 25, 20, 15, 10]);
        // Too low to make the board
        assert!(!scores.record("h", 1, 5, 0.0));
    }

    #[test]
    fn test_guest_not_listed_as_player() {
        let mut scores = HighScores::new();
        scores.record("", 10, 5, 0.0);
        scores.record(GUEST_NAME, 15, 5, 0.0);
        scores.record("Rex", 5, 5, 0.0);
        assert_eq!(scores.players, vec!["Rex".to_string()]);
        assert_eq!(scores.top(5)[0].player_name, GUEST_NAME);
        assert_eq!(scores.top(5).len(), 2);
    }

    #[test]
    fn test_matching_players_ignores_case() {
        let mut scores = HighScores::new();
        scores.record("Luna", 1, 5, 0.0);
        scores.record("Lucky", 1, 5, 0.0);
        scores.record("Rex", 1, 5, 0.0);
        assert_eq!(scores.matching_players("lu"), vec!["Luna", "Lucky"]);
        assert_eq!(scores.matching_players("EX"), vec!["Rex"]);
        assert_eq!(scores.matching_players("").len(), 3);
    }

    #[test]
    fn test_merge_takes_best_per_player() {
        let mut local = HighScores::new();
        local.record("Luna", 20, 5, 0.0);
        local.record("Rex", 30, 5, 0.0);

        let mut remote = HighScores::new();
        remote.record("Luna", 45, 5, 0.0);
        remote.record("Rex", 10, 5, 0.0);
        remote.record("Max", 15, 3, 0.0);

        local.merge(&remote);
        let top: Vec<(&str, u32)> = local
            .top(5)
            .iter()
            .map(|e| (e.player_name.as_str(), e.score))
            .collect();
        assert_eq!(top, vec![("Luna", 45), ("Rex", 30)]);
        assert_eq!(local.top(3)[0].player_name, "Max");
        assert!(local.players.contains(&"Max".to_string()));
    }

    #[test]
    fn test_serde_round_trip_keeps_boards() {
        let mut scores = HighScores::new();
        scores.record("Luna", 20, 5, 12.5);
        let json = serde_json::to_string(&scores).expect("serialize");
        let back: HighScores = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.top(5), scores.top(5));
    }

    #[test]
    fn test_sink_add_score_succeeds_natively() {
        let mut scores = HighScores::new();
        scores.add_score("Luna", 25, 5).expect("native save is a no-op");
        assert_eq!(scores.top_scores(5)[0].score, 25);
    }
}
