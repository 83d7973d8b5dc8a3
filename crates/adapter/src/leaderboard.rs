//! Leaderboard - ranked top scores persisted as JSON.
//!
//! The file holds a plain array of `{ "name": ..., "score": ... }` entries,
//! best first. A missing file is an empty board; a corrupt one is an error the
//! caller decides how to handle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::engine::ScoreReporter;
use crate::types::LEADERBOARD_SIZE;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read leaderboard {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write leaderboard {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("leaderboard {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode leaderboard: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

/// Top scores, best first, never longer than [`LEADERBOARD_SIZE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary entries, re-ranking and truncating
    pub fn from_entries(entries: Vec<ScoreEntry>) -> Self {
        let mut board = Self { entries };
        board.rank();
        board
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a score. Returns its zero-based rank if it made the board.
    ///
    /// Ties keep earlier entries ahead of the new one.
    pub fn record(&mut self, name: &str, score: u64) -> Option<usize> {
        self.entries.push(ScoreEntry {
            name: name.to_string(),
            score,
        });
        let new_index = self.entries.len() - 1;
        let mut ranked: Vec<(usize, ScoreEntry)> = self.entries.drain(..).enumerate().collect();
        ranked.sort_by(|a, b| b.1.score.cmp(&a.1.score));
        ranked.truncate(LEADERBOARD_SIZE);

        let rank = ranked.iter().position(|(i, _)| *i == new_index);
        self.entries = ranked.into_iter().map(|(_, e)| e).collect();
        rank
    }

    fn rank(&mut self) {
        // Stable sort: equal scores keep insertion order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_SIZE);
    }
}

/// A leaderboard backed by a JSON file.
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
    board: Leaderboard,
}

impl LeaderboardStore {
    /// Open the file at `path`; a missing file starts an empty board.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let board = read_board(&path)?;
        debug!(path = %path.display(), entries = board.len(), "leaderboard loaded");
        Ok(Self { path, board })
    }

    /// An empty board at `path`, ignoring whatever is on disk now
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            board: Leaderboard::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn board(&self) -> &Leaderboard {
        &self.board
    }

    /// Record a score and write the board back.
    pub fn submit(&mut self, name: &str, score: u64) -> Result<Option<usize>, StoreError> {
        let rank = self.board.record(name, score);
        self.save()?;
        info!(name, score, rank = ?rank, "score recorded");
        Ok(rank)
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.board)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Read a board from disk; a missing file is an empty board.
pub fn read_board(path: &Path) -> Result<Leaderboard, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Leaderboard::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if text.trim().is_empty() {
        return Ok(Leaderboard::new());
    }
    let entries: Vec<ScoreEntry> = serde_json::from_str(&text).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Leaderboard::from_entries(entries))
}

impl ScoreReporter for LeaderboardStore {
    fn report_game_end(&mut self, final_score: u64, player_name: &str) {
        if let Err(err) = self.submit(player_name, final_score) {
            tracing::error!(error = %err, "failed to persist leaderboard");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ranks_descending_and_keeps_five() {
        let mut board = Leaderboard::new();
        for (name, score) in [("a", 10), ("b", 50), ("c", 30), ("d", 20), ("e", 40)] {
            board.record(name, score);
        }
        assert_eq!(board.record("f", 5), None);
        assert_eq!(board.record("g", 45), Some(1));

        let scores: Vec<u64> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 45, 40, 30, 20]);
    }

    #[test]
    fn ties_keep_the_earlier_entry_first() {
        let mut board = Leaderboard::new();
        board.record("first", 100);
        assert_eq!(board.record("second", 100), Some(1));
        assert_eq!(board.entries()[0].name, "first");
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut board = Leaderboard::new();
        board.record("ace", 7);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"[{"name":"ace","score":7}]"#);
    }

    #[test]
    fn missing_file_is_empty_board() {
        let dir = tempfile::tempdir().unwrap();
        let board = read_board(&dir.path().join("nope.json")).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(read_board(&path), Err(StoreError::Parse { .. })));
    }
}
