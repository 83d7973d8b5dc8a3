//! Dual Core terminal runner (default binary).
//!
//! One loop iteration per display frame: drain input, run one session
//! update against a monotonic clock, flush the changed cells.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dual_core::adapter::{AppConfig, LeaderboardStore};
use dual_core::engine::GameSession;
use dual_core::host::TerminalHost;
use dual_core::input::{handle_key_event, is_back_key, menu_choice, should_quit};
use dual_core::term::{DualView, TerminalRenderer};
use dual_core::types::Phase;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_tracing(&config)?;
    info!(player = %config.player_name, seed = config.seed, "starting");

    let scores = match LeaderboardStore::load(&config.scores_path) {
        Ok(store) => store,
        Err(err) => {
            error!(error = %err, "unreadable leaderboard, starting empty");
            LeaderboardStore::empty(&config.scores_path)
        }
    };
    let mut host = TerminalHost::new(DualView::new(config.field_height), scores);
    let mut session = GameSession::new(config.session_config());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &mut host);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file only: the terminal belongs to the game.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession, host: &mut TerminalHost) -> Result<()> {
    let clock = Instant::now();
    let mut last_frame = clock.elapsed();

    loop {
        let now_ms = clock.elapsed().as_secs_f64() * 1000.0;

        // Input with timeout until the next frame.
        let timeout = FRAME.saturating_sub(clock.elapsed().saturating_sub(last_frame));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if is_back_key(key) {
                        session.return_to_menu(host);
                    } else if session.phase() == Phase::Menu {
                        if let Some(difficulty) = menu_choice(key) {
                            session.select_difficulty(difficulty, now_ms, host);
                        }
                    } else if let Some(action) = handle_key_event(key) {
                        session.apply_action(action, host);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Frame.
        let elapsed = clock.elapsed();
        if elapsed.saturating_sub(last_frame) >= FRAME {
            let frame_ms = elapsed.saturating_sub(last_frame).as_secs_f64() * 1000.0;
            last_frame = elapsed;

            host.tick(frame_ms);
            host.view_mut().begin_frame();
            session.update(elapsed.as_secs_f64() * 1000.0, host);
            term.draw_swap(host.view_mut().frame_mut())?;
        }
    }
}
