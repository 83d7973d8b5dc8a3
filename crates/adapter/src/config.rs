//! Environment configuration.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::engine::SessionConfig;
use crate::types::DEFAULT_FIELD_HEIGHT;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub player_name: String,
    pub scores_path: PathBuf,
    pub seed: u32,
    pub log_path: Option<PathBuf>,
    pub field_height: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player_name: "PLAYER".to_string(),
            scores_path: PathBuf::from("dualcore_scores.json"),
            seed: 1,
            log_path: None,
            field_height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

impl AppConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from any key lookup (tests pass a map instead of the process
    /// environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let player_name = non_empty("DUAL_CORE_PLAYER").unwrap_or(defaults.player_name);

        let scores_path = non_empty("DUAL_CORE_SCORES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.scores_path);

        let seed = non_empty("DUAL_CORE_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let log_path = non_empty("DUAL_CORE_LOG_PATH").map(PathBuf::from);

        let field_height = non_empty("DUAL_CORE_FIELD_HEIGHT")
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|h| h.is_finite() && *h > 0.0)
            .unwrap_or(defaults.field_height);

        Self {
            player_name,
            scores_path,
            seed,
            log_path,
            field_height,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            seed: self.seed,
            player_name: self.player_name.clone(),
            field_height: self.field_height,
            ..SessionConfig::default()
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
