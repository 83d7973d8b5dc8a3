//! The terminal host: presenter, audio sink, and score reporter in one value.

use tracing::warn;

use crate::adapter::{CueLog, LeaderboardStore};
use crate::core::{Feedback, Flash, Grid, Obstacle, Piece, Spark, Vehicle};
use crate::engine::{AudioSink, Presenter, ScoreReporter};
use crate::term::DualView;
use crate::types::{Difficulty, SoundKind};

pub struct TerminalHost {
    view: DualView,
    audio: CueLog,
    scores: LeaderboardStore,
    last_rank: Option<usize>,
}

impl TerminalHost {
    pub fn new(view: DualView, scores: LeaderboardStore) -> Self {
        let mut host = Self {
            view,
            audio: CueLog::new(),
            scores,
            last_rank: None,
        };
        host.sync_leaderboard();
        host
    }

    pub fn view(&self) -> &DualView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut DualView {
        &mut self.view
    }

    pub fn audio(&self) -> &CueLog {
        &self.audio
    }

    pub fn scores(&self) -> &LeaderboardStore {
        &self.scores
    }

    /// Rank of the most recently reported score, if it made the board
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Per-frame housekeeping outside the session (music ramp).
    pub fn tick(&mut self, elapsed_ms: f64) {
        self.audio.tick(elapsed_ms);
    }

    fn sync_leaderboard(&mut self) {
        let rows = self
            .scores
            .board()
            .entries()
            .iter()
            .map(|e| (e.name.clone(), e.score))
            .collect();
        self.view.set_leaderboard(rows, self.last_rank);
    }
}

impl Presenter for TerminalHost {
    fn present_grid(&mut self, grid: &Grid, current: &Piece, next: &Piece, sparks: &[Spark]) {
        self.view.present_grid(grid, current, next, sparks);
    }

    fn present_traffic(
        &mut self,
        lane_count: u8,
        vehicle: &Vehicle,
        obstacles: &[Obstacle],
        flashes: &[Flash],
        road_offset: f64,
    ) {
        self.view
            .present_traffic(lane_count, vehicle, obstacles, flashes, road_offset);
    }

    fn present_hud(&mut self, score: u64, lives: u32, elapsed_seconds: u64, feedback: Option<&Feedback>) {
        self.view.present_hud(score, lives, elapsed_seconds, feedback);
    }

    fn present_menu(&mut self, choices: &[Difficulty]) {
        self.view.present_menu(choices);
    }

    fn present_countdown(&mut self, label: &str) {
        self.view.present_countdown(label);
    }

    fn present_results(&mut self, final_score: u64) {
        self.view.present_results(final_score);
    }
}

impl AudioSink for TerminalHost {
    fn play_sound(&mut self, kind: SoundKind, pitch_offset: f64) {
        self.audio.play_sound(kind, pitch_offset);
    }

    fn request_tempo_ramp(&mut self) {
        self.audio.request_tempo_ramp();
    }

    fn start_music(&mut self) {
        self.last_rank = None;
        self.audio.start_music();
    }

    fn stop_music(&mut self) {
        self.audio.stop_music();
    }
}

impl ScoreReporter for TerminalHost {
    fn report_game_end(&mut self, final_score: u64, player_name: &str) {
        self.last_rank = match self.scores.submit(player_name, final_score) {
            Ok(rank) => rank,
            Err(err) => {
                // The board in memory still has the score; only the file is stale.
                warn!(error = %err, "leaderboard not saved");
                self.scores
                    .board()
                    .entries()
                    .iter()
                    .position(|e| e.score == final_score && e.name == player_name)
            }
        };
        self.sync_leaderboard();
    }
}
