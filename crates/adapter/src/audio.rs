//! Audio collaborator for hosts without a sound device.
//!
//! Cues are logged rather than synthesized. The one piece of real state is
//! the background-music playback rate, which ramps toward a target in small
//! steps so tempo changes are never audible as a jump.

use tracing::{debug, trace};

use crate::engine::AudioSink;
use crate::types::SoundKind;

const BASE_RATE: f64 = 1.0;
const MAX_RATE: f64 = 1.4;
const RATE_REQUEST_STEP: f64 = 0.02;
const RAMP_STEP: f64 = 0.01;
const RAMP_PERIOD_MS: f64 = 40.0;

/// Background-music playback rate with a stepped ramp toward its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicRate {
    rate: f64,
    target: f64,
    carry_ms: f64,
}

impl Default for MusicRate {
    fn default() -> Self {
        Self {
            rate: BASE_RATE,
            target: BASE_RATE,
            carry_ms: 0.0,
        }
    }
}

impl MusicRate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Ask for a slightly faster tempo, capped at 1.4x.
    pub fn request(&mut self) {
        self.target = (self.rate + RATE_REQUEST_STEP).min(MAX_RATE);
    }

    /// Advance the ramp by `elapsed_ms`: one 0.01 step per 40 ms.
    pub fn tick(&mut self, elapsed_ms: f64) {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return;
        }
        if self.rate >= self.target {
            self.carry_ms = 0.0;
            return;
        }
        self.carry_ms += elapsed_ms;
        while self.carry_ms >= RAMP_PERIOD_MS && self.rate < self.target {
            self.carry_ms -= RAMP_PERIOD_MS;
            self.rate = (self.rate + RAMP_STEP).min(self.target);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// An [`AudioSink`] that traces cues and tracks the music rate.
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    music: MusicRate,
    playing: bool,
    cues: u64,
    last_cue: Option<(SoundKind, f64)>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn music(&self) -> &MusicRate {
        &self.music
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Cues played since creation
    pub fn cue_count(&self) -> u64 {
        self.cues
    }

    /// Most recent cue and its pitch offset
    pub fn last_cue(&self) -> Option<(SoundKind, f64)> {
        self.last_cue
    }

    /// Called by the host once per frame with wall-clock time since the last
    pub fn tick(&mut self, elapsed_ms: f64) {
        let before = self.music.rate();
        self.music.tick(elapsed_ms);
        if self.music.rate() != before {
            trace!(rate = self.music.rate(), "music rate");
        }
    }
}

impl AudioSink for CueLog {
    fn play_sound(&mut self, kind: SoundKind, pitch_offset: f64) {
        self.cues += 1;
        self.last_cue = Some((kind, pitch_offset));
        debug!(
            kind = kind.as_str(),
            frequency_hz = kind.base_frequency_hz() + pitch_offset,
            "sound cue"
        );
    }

    fn request_tempo_ramp(&mut self) {
        self.music.request();
        debug!(rate_target = self.music.target(), "tempo ramp requested");
    }

    fn start_music(&mut self) {
        self.music.reset();
        self.playing = true;
        debug!("music started");
    }

    fn stop_music(&mut self) {
        self.playing = false;
        debug!("music stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_steps_every_forty_ms() {
        let mut m = MusicRate::new();
        m.request();
        assert!((m.target() - 1.02).abs() < 1e-9);

        m.tick(39.0);
        assert_eq!(m.rate(), 1.0);
        m.tick(1.0);
        assert!((m.rate() - 1.01).abs() < 1e-9);
        m.tick(400.0);
        assert!((m.rate() - 1.02).abs() < 1e-9);
    }

    #[test]
    fn target_caps_at_max() {
        let mut m = MusicRate::new();
        for _ in 0..100 {
            m.request();
            m.tick(1000.0);
        }
        assert!((m.rate() - MAX_RATE).abs() < 1e-9);
        m.request();
        assert!(m.target() <= MAX_RATE);
    }

    #[test]
    fn start_music_resets_rate() {
        let mut cues = CueLog::new();
        cues.request_tempo_ramp();
        cues.tick(1000.0);
        assert!(cues.music().rate() > 1.0);

        cues.start_music();
        assert_eq!(cues.music().rate(), 1.0);
        assert!(cues.is_playing());
    }

    #[test]
    fn play_sound_records_cue() {
        let mut cues = CueLog::new();
        cues.play_sound(SoundKind::Beep, 150.0);
        assert_eq!(cues.cue_count(), 1);
        assert_eq!(cues.last_cue(), Some((SoundKind::Beep, 150.0)));
    }
}
