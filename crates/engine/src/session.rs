//! Game session - the frame scheduler and its phase machine
//!
//! `Menu → Countdown → Running → Ended → Menu`. The host calls
//! [`GameSession::update`] once per display refresh with a monotonic clock in
//! milliseconds; that single call polls the session's timers and advances
//! whichever phase is active. Input is applied synchronously through
//! [`GameSession::apply_action`] whenever it arrives.
//!
//! All run state lives in one [`Run`] value that is rebuilt from scratch for
//! every run, and every timer is owned by the session's [`TimerTable`], so
//! ending a run leaves nothing behind that could leak into the next one.

use tracing::{debug, info, warn};

use crate::core::{BlockEngine, DropOutcome, RunState, SimpleRng, TrafficEngine, FEEDBACK_RED};
use crate::delta::normalize_frame_delta;
use crate::ports::Host;
use crate::timers::{TimerName, TimerTable};
use crate::types::{
    Difficulty, GameAction, Phase, SoundKind, COLLISION_FEEDBACK, COUNTDOWN_LABELS,
    COUNTDOWN_LAUNCH_MS, COUNTDOWN_STEP_MS, DEFAULT_FIELD_HEIGHT, GAME_OVER_DISPLAY_MS,
    NOMINAL_FRAME_MS,
};

/// Pitch step between countdown beeps
const COUNTDOWN_PITCH_STEP: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub seed: u32,
    pub player_name: String,
    /// Height of the traffic field in world units
    pub field_height: f64,
    /// Block auto-drop speed multiplier
    pub drop_speed: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            player_name: "PLAYER".to_string(),
            field_height: DEFAULT_FIELD_HEIGHT,
            drop_speed: 1.0,
        }
    }
}

/// Everything that belongs to one run. Rebuilt on every run start.
#[derive(Debug, Clone)]
pub struct Run {
    blocks: BlockEngine,
    traffic: TrafficEngine,
    state: RunState,
    difficulty: Difficulty,
    last_frame_ms: f64,
    frames: u64,
}

impl Run {
    pub fn blocks(&self) -> &BlockEngine {
        &self.blocks
    }

    pub fn traffic(&self) -> &TrafficEngine {
        &self.traffic
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Frames simulated so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[doc(hidden)]
    pub fn blocks_mut(&mut self) -> &mut BlockEngine {
        &mut self.blocks
    }

    #[doc(hidden)]
    pub fn traffic_mut(&mut self) -> &mut TrafficEngine {
        &mut self.traffic
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub final_score: u64,
    pub difficulty: Difficulty,
    pub elapsed_seconds: u64,
    pub frames: u64,
}

#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    rng: SimpleRng,
    phase: Phase,
    difficulty: Option<Difficulty>,
    timers: TimerTable,
    countdown_step: usize,
    run: Option<Run>,
    last_summary: Option<RunSummary>,
    runs_finished: u32,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let rng = SimpleRng::new(config.seed);
        Self {
            config,
            rng,
            phase: Phase::Menu,
            difficulty: None,
            timers: TimerTable::new(),
            countdown_step: 0,
            run: None,
            last_summary: None,
            runs_finished: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    #[doc(hidden)]
    pub fn run_mut(&mut self) -> Option<&mut Run> {
        self.run.as_mut()
    }

    pub fn timers(&self) -> &TimerTable {
        &self.timers
    }

    pub fn last_summary(&self) -> Option<RunSummary> {
        self.last_summary
    }

    pub fn runs_finished(&self) -> u32 {
        self.runs_finished
    }

    /// Label currently shown by the countdown, if counting down
    pub fn countdown_label(&self) -> Option<&'static str> {
        if self.phase != Phase::Countdown {
            return None;
        }
        COUNTDOWN_LABELS.get(self.countdown_step).copied()
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            info!(from = self.phase.as_str(), to = phase.as_str(), "phase change");
            self.phase = phase;
        }
    }

    /// Menu → Countdown. Ignored outside the menu.
    pub fn select_difficulty<H: Host>(&mut self, difficulty: Difficulty, now_ms: f64, host: &mut H) -> bool {
        if self.phase != Phase::Menu {
            return false;
        }
        self.difficulty = Some(difficulty);
        info!(difficulty = difficulty.label(), "difficulty selected");
        self.set_phase(Phase::Countdown);
        host.start_music();
        self.countdown_step = 0;
        self.show_countdown_step(now_ms, host);
        true
    }

    fn show_countdown_step<H: Host>(&mut self, now_ms: f64, host: &mut H) {
        let remaining = COUNTDOWN_LABELS.len() - self.countdown_step;
        host.present_countdown(COUNTDOWN_LABELS[self.countdown_step]);
        host.play_sound(SoundKind::Beep, COUNTDOWN_PITCH_STEP * remaining as f64);

        let delay = if remaining > 1 {
            COUNTDOWN_STEP_MS
        } else {
            COUNTDOWN_LAUNCH_MS
        };
        self.timers.start_once(TimerName::Countdown, delay, now_ms);
    }

    /// The frame callback: poll timers, then advance the active phase.
    pub fn update<H: Host>(&mut self, now_ms: f64, host: &mut H) {
        let was_running = self.phase == Phase::Running;
        for name in self.timers.poll(now_ms) {
            self.on_timer(name, now_ms, host);
        }

        match self.phase {
            Phase::Menu => host.present_menu(&Difficulty::ALL),
            Phase::Countdown => {
                if let Some(label) = self.countdown_label() {
                    host.present_countdown(label);
                }
            }
            // A run started by this poll gets its first frame on the next refresh.
            Phase::Running if !was_running => {}
            Phase::Running => self.frame(now_ms, host),
            Phase::Ended => {
                let score = self.last_summary.map(|s| s.final_score).unwrap_or(0);
                host.present_results(score);
            }
        }
    }

    fn on_timer<H: Host>(&mut self, name: TimerName, now_ms: f64, host: &mut H) {
        match (name, self.phase) {
            (TimerName::ObstacleSpawn, Phase::Running) => {
                if let Some(run) = self.run.as_mut() {
                    if run.state.is_alive() {
                        run.traffic.spawn_obstacle();
                    }
                }
            }
            (TimerName::Countdown, Phase::Countdown) => {
                self.countdown_step += 1;
                if self.countdown_step < COUNTDOWN_LABELS.len() {
                    self.show_countdown_step(now_ms, host);
                } else {
                    self.begin_run(now_ms);
                }
            }
            (TimerName::GameOverDisplay, Phase::Ended) => {
                self.run = None;
                self.difficulty = None;
                self.set_phase(Phase::Menu);
            }
            (name, phase) => {
                // Table entries are cancelled on every phase exit.
                warn!(timer = name.as_str(), phase = phase.as_str(), "stray timer fired");
            }
        }
    }

    /// Countdown → Running with a fresh grid, road, and run state.
    fn begin_run(&mut self, now_ms: f64) {
        let Some(difficulty) = self.difficulty else {
            warn!("countdown finished without a difficulty");
            self.set_phase(Phase::Menu);
            return;
        };
        let preset = difficulty.preset();

        let mut blocks = BlockEngine::new(self.rng.fork());
        blocks.set_speed_multiplier(self.config.drop_speed);
        let traffic = TrafficEngine::new(preset, self.config.field_height, self.rng.fork());

        self.run = Some(Run {
            blocks,
            traffic,
            state: RunState::new(now_ms),
            difficulty,
            last_frame_ms: now_ms,
            frames: 0,
        });

        self.timers.cancel_all();
        self.timers
            .start_interval(TimerName::ObstacleSpawn, preset.spawn_interval_ms, now_ms);
        info!(
            lanes = preset.lane_count,
            base_speed = preset.base_obstacle_speed,
            spawn_interval_ms = preset.spawn_interval_ms,
            "run started"
        );
        self.set_phase(Phase::Running);
    }

    /// One Running frame. Ends the run when lives reach zero.
    fn frame<H: Host>(&mut self, now_ms: f64, host: &mut H) {
        let Some(run) = self.run.as_mut() else {
            return;
        };

        let alive = if run.state.is_alive() {
            step_run(run, now_ms, host)
        } else {
            false
        };

        if !alive {
            self.end_run(now_ms, host);
        }
    }

    /// Running → Ended, exactly once per run.
    fn end_run<H: Host>(&mut self, now_ms: f64, host: &mut H) {
        if self.phase != Phase::Running {
            return;
        }
        let Some(run) = self.run.as_ref() else {
            return;
        };

        self.timers.cancel_all();

        let summary = RunSummary {
            final_score: run.state.score(),
            difficulty: run.difficulty,
            elapsed_seconds: run.state.elapsed_seconds(now_ms),
            frames: run.frames,
        };
        self.last_summary = Some(summary);
        self.runs_finished += 1;
        info!(
            score = summary.final_score,
            seconds = summary.elapsed_seconds,
            difficulty = summary.difficulty.label(),
            "run ended"
        );

        host.stop_music();
        host.report_game_end(summary.final_score, &self.config.player_name);

        self.timers
            .start_once(TimerName::GameOverDisplay, GAME_OVER_DISPLAY_MS, now_ms);
        self.set_phase(Phase::Ended);
    }

    /// Apply one input immediately. Only meaningful while running.
    pub fn apply_action<H: Host>(&mut self, action: GameAction, host: &mut H) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        if !run.state.is_alive() {
            return false;
        }

        match action {
            GameAction::PieceLeft => run.blocks.try_move(-1, 0),
            GameAction::PieceRight => run.blocks.try_move(1, 0),
            GameAction::PieceRotate => run.blocks.try_rotate(),
            GameAction::PieceSoftDrop => {
                let outcome = run.blocks.soft_drop();
                apply_drop(&mut run.state, outcome, host);
                outcome != DropOutcome::Inert
            }
            GameAction::LaneLeft => run.traffic.lane_left(),
            GameAction::LaneRight => run.traffic.lane_right(),
        }
    }

    /// Abandon whatever is in progress and go back to the menu.
    pub fn return_to_menu<H: Host>(&mut self, host: &mut H) {
        if self.phase == Phase::Menu {
            return;
        }
        self.timers.cancel_all();
        if self.phase != Phase::Ended {
            host.stop_music();
        }
        self.run = None;
        self.difficulty = None;
        self.set_phase(Phase::Menu);
    }
}

/// Advance a live run by one frame; returns whether it is still alive.
fn step_run<H: Host>(run: &mut Run, now_ms: f64, host: &mut H) -> bool {
    if run.blocks.topped_out() {
        run.state.top_out();
        return false;
    }

    let frame_ms = now_ms - run.last_frame_ms;
    run.last_frame_ms = now_ms;
    let delta = normalize_frame_delta(frame_ms);
    run.frames += 1;

    if let Some(outcome) = run.blocks.tick(delta * NOMINAL_FRAME_MS) {
        apply_drop(&mut run.state, outcome, host);
    }

    run.traffic.advance(delta);
    run.traffic.prune_offscreen();
    for hit in run.traffic.check_collisions() {
        run.state.lose_life();
        run.state.set_feedback(COLLISION_FEEDBACK, FEEDBACK_RED);
        host.play_sound(SoundKind::Crash, 0.0);
        host.request_tempo_ramp();
        info!(lane = hit.lane, lives = run.state.lives(), "traffic collision");
    }

    host.present_grid(
        run.blocks.grid(),
        run.blocks.current(),
        run.blocks.next(),
        run.blocks.sparks(),
    );
    host.present_traffic(
        run.traffic.lane_count(),
        run.traffic.vehicle(),
        run.traffic.obstacles(),
        run.traffic.flashes(),
        run.traffic.road_offset(),
    );
    host.present_hud(
        run.state.score(),
        run.state.lives(),
        run.state.elapsed_seconds(now_ms),
        run.state.feedback(),
    );

    run.state.add_frame_score();
    run.state.decay_feedback();
    run.blocks.decay_sparks();
    run.traffic.decay_flashes();

    run.state.is_alive()
}

fn apply_drop<H: Host>(state: &mut RunState, outcome: DropOutcome, host: &mut H) {
    let DropOutcome::Locked(lock) = outcome else {
        return;
    };
    if lock.lines_cleared > 0 {
        host.play_sound(SoundKind::Line, 0.0);
    }
    if lock.topped_out {
        info!("grid topped out, run over");
        state.top_out();
    } else {
        debug!(lines = lock.lines_cleared, "piece locked");
    }
}
