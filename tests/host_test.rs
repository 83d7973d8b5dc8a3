//! Terminal host tests: one session driven end to end into a real view

use dual_core::adapter::LeaderboardStore;
use dual_core::engine::{GameSession, SessionConfig};
use dual_core::host::TerminalHost;
use dual_core::core::Obstacle;
use dual_core::term::{DualView, VIEW_HEIGHT};
use dual_core::types::{Difficulty, Phase, NOMINAL_FRAME_MS};

fn screen_text(host: &TerminalHost) -> String {
    let fb = host.view().frame();
    (0..VIEW_HEIGHT)
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn frame(session: &mut GameSession, host: &mut TerminalHost, now: f64) {
    host.view_mut().begin_frame();
    session.update(now, host);
}

#[test]
fn full_run_records_score_and_shows_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    let mut host = TerminalHost::new(DualView::new(720.0), LeaderboardStore::empty(&path));
    let mut session = GameSession::new(SessionConfig {
        player_name: "ace".to_string(),
        ..SessionConfig::default()
    });

    frame(&mut session, &mut host, 0.0);
    assert!(screen_text(&host).contains("no scores yet"));

    session.select_difficulty(Difficulty::Easy, 0.0, &mut host);
    assert!(host.audio().is_playing());
    let mut now = 0.0;
    for t in [1000.0, 2000.0, 3000.0, 4000.0] {
        now = t;
        frame(&mut session, &mut host, now);
    }
    assert!(screen_text(&host).contains("GO!"));
    now += 500.0;
    frame(&mut session, &mut host, now);
    assert_eq!(session.phase(), Phase::Running);

    for _ in 0..3 {
        now += NOMINAL_FRAME_MS;
        frame(&mut session, &mut host, now);
    }
    assert!(screen_text(&host).contains("SCORE 2"));

    let run = session.run_mut().unwrap();
    let v = *run.traffic().vehicle();
    for _ in 0..5 {
        run.traffic_mut().push_obstacle(Obstacle {
            lane: v.lane,
            y: v.y,
            speed: 1.0,
        });
    }
    now += NOMINAL_FRAME_MS;
    frame(&mut session, &mut host, now);
    assert_eq!(session.phase(), Phase::Ended);
    assert!(!host.audio().is_playing());
    assert_eq!(host.last_rank(), Some(0));

    now += NOMINAL_FRAME_MS;
    frame(&mut session, &mut host, now);
    let text = screen_text(&host);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("FINAL SCORE 4"));
    assert!(text.contains("ace"));

    let reopened = LeaderboardStore::load(&path).unwrap();
    assert_eq!(reopened.board().entries()[0].score, 4);
}
