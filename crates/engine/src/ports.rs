//! Collaborator interfaces the session calls out to.
//!
//! The session never draws, plays audio, or touches storage itself. It hands
//! engine state to a [`Presenter`], fire-and-forget cues to an [`AudioSink`],
//! and the final score to a [`ScoreReporter`]. A host implements all three;
//! [`Host`] is the bundle the session takes.

use crate::core::{Feedback, Flash, Grid, Obstacle, Piece, Spark, Vehicle};
use crate::types::{Difficulty, SoundKind};

/// Render calls. Every method draws; none returns data.
pub trait Presenter {
    fn present_grid(&mut self, grid: &Grid, current: &Piece, next: &Piece, sparks: &[Spark]);

    fn present_traffic(
        &mut self,
        lane_count: u8,
        vehicle: &Vehicle,
        obstacles: &[Obstacle],
        flashes: &[Flash],
        road_offset: f64,
    );

    fn present_hud(&mut self, score: u64, lives: u32, elapsed_seconds: u64, feedback: Option<&Feedback>);

    /// Menu screen, shown every update while in the menu
    fn present_menu(&mut self, _choices: &[Difficulty]) {}

    /// One countdown label (`3`, `2`, `1`, `READY`, `GO!`)
    fn present_countdown(&mut self, _label: &str) {}

    /// Results screen after a run
    fn present_results(&mut self, _final_score: u64) {}
}

/// Audio cues. Playback is never awaited.
pub trait AudioSink {
    fn play_sound(&mut self, kind: SoundKind, pitch_offset: f64);

    /// A traffic collision raised the difficulty; speed the music up.
    fn request_tempo_ramp(&mut self) {}

    fn start_music(&mut self) {}

    fn stop_music(&mut self) {}
}

/// Leaderboard collaborator; called exactly once per finished run.
pub trait ScoreReporter {
    fn report_game_end(&mut self, final_score: u64, player_name: &str);
}

/// Everything the session needs from its host.
pub trait Host: Presenter + AudioSink + ScoreReporter {}

impl<T: Presenter + AudioSink + ScoreReporter> Host for T {}
