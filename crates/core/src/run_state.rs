//! Shared run state: score, lives, clock, and the transient feedback message.
//!
//! Both engines report events; the session applies them here. The state never
//! decides when a run ends, it only answers [`RunState::is_alive`].

use crate::types::{FEEDBACK_FRAMES, STARTING_LIVES};

/// 24-bit color of the collision feedback message
pub const FEEDBACK_RED: (u8, u8, u8) = (0xff, 0x40, 0x40);

/// A message shown over the HUD for a fixed number of frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: &'static str,
    pub color: (u8, u8, u8),
    pub frames_left: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    score: u64,
    lives: u32,
    started_at_ms: f64,
    feedback: Option<Feedback>,
}

impl RunState {
    /// A fresh run started at `now_ms`
    pub fn new(now_ms: f64) -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            started_at_ms: now_ms,
            feedback: None,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Whole seconds since the run began
    pub fn elapsed_seconds(&self, now_ms: f64) -> u64 {
        let elapsed = now_ms - self.started_at_ms;
        if elapsed.is_finite() && elapsed > 0.0 {
            (elapsed / 1000.0).floor() as u64
        } else {
            0
        }
    }

    /// One rendered frame survived
    pub fn add_frame_score(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// The block grid overflowed: the whole run is over
    pub fn top_out(&mut self) {
        self.lives = 0;
    }

    pub fn set_feedback(&mut self, message: &'static str, color: (u8, u8, u8)) {
        self.feedback = Some(Feedback {
            message,
            color,
            frames_left: FEEDBACK_FRAMES,
        });
    }

    /// Count down the feedback timer, clearing the message when it expires
    pub fn decay_feedback(&mut self) {
        if let Some(fb) = self.feedback.as_mut() {
            fb.frames_left = fb.frames_left.saturating_sub(1);
            if fb.frames_left == 0 {
                self.feedback = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_run() {
        let run = RunState::new(1000.0);
        assert_eq!(run.score(), 0);
        assert_eq!(run.lives(), STARTING_LIVES);
        assert!(run.is_alive());
        assert!(run.feedback().is_none());
    }

    #[test]
    fn lives_saturate_at_zero() {
        let mut run = RunState::new(0.0);
        for _ in 0..STARTING_LIVES + 3 {
            run.lose_life();
        }
        assert_eq!(run.lives(), 0);
        assert!(!run.is_alive());
    }

    #[test]
    fn top_out_kills_immediately() {
        let mut run = RunState::new(0.0);
        run.top_out();
        assert_eq!(run.lives(), 0);
    }

    #[test]
    fn elapsed_seconds_floor() {
        let run = RunState::new(500.0);
        assert_eq!(run.elapsed_seconds(500.0), 0);
        assert_eq!(run.elapsed_seconds(1499.0), 0);
        assert_eq!(run.elapsed_seconds(1500.0), 1);
        assert_eq!(run.elapsed_seconds(12_600.0), 12);
        assert_eq!(run.elapsed_seconds(f64::NAN), 0);
        assert_eq!(run.elapsed_seconds(0.0), 0);
    }

    #[test]
    fn feedback_expires_after_its_frames() {
        let mut run = RunState::new(0.0);
        run.set_feedback("Speed Up!", FEEDBACK_RED);
        for _ in 0..FEEDBACK_FRAMES - 1 {
            run.decay_feedback();
        }
        assert_eq!(run.feedback().map(|f| f.frames_left), Some(1));
        run.decay_feedback();
        assert!(run.feedback().is_none());
    }
}
