//! Key mapping from terminal events to game actions.

use crate::types::{Difficulty, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Letters drive the falling piece, arrows drive the vehicle, so both
/// engines can be played with two hands at once.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Block grid
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::PieceLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::PieceRight),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::PieceRotate),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::PieceSoftDrop),

        // Traffic lanes
        KeyCode::Left => Some(GameAction::LaneLeft),
        KeyCode::Right => Some(GameAction::LaneRight),

        _ => None,
    }
}

/// Difficulty picked on the menu screen, by number or initial.
pub fn menu_choice(key: KeyEvent) -> Option<Difficulty> {
    match key.code {
        KeyCode::Char('1') | KeyCode::Char('e') | KeyCode::Char('E') => Some(Difficulty::Easy),
        KeyCode::Char('2') | KeyCode::Char('n') | KeyCode::Char('N') => Some(Difficulty::Normal),
        KeyCode::Char('3') | KeyCode::Char('h') | KeyCode::Char('H') => Some(Difficulty::Hard),
        _ => None,
    }
}

/// Abandon the current countdown, run, or results screen.
pub fn is_back_key(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
