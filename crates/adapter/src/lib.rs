//! Host-side collaborators for a game session
//!
//! The simulation only calls traits; this crate supplies the pieces a real
//! host plugs in behind them:
//!
//! - [`LeaderboardStore`]: the top-5 score list, persisted as JSON
//! - [`CueLog`]: sound cues and the background-music rate ramp
//! - [`AppConfig`]: settings read from the environment
//!
//! # Example
//!
//! ```
//! use dual_core_adapter::Leaderboard;
//!
//! let mut board = Leaderboard::new();
//! assert_eq!(board.record("ace", 120), Some(0));
//! assert_eq!(board.record("bob", 300), Some(0));
//! assert_eq!(board.entries()[1].name, "ace");
//! ```

pub mod audio;
pub mod config;
pub mod leaderboard;

pub use dual_core_engine as engine;
pub use dual_core_types as types;

pub use audio::{CueLog, MusicRate};
pub use config::AppConfig;
pub use leaderboard::{Leaderboard, LeaderboardStore, ScoreEntry, StoreError};
