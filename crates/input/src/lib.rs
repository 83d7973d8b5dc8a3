//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`], the menu's
//! difficulty choices, and the quit/back keys. Nothing here holds state:
//! every key press is applied as soon as it arrives.

pub mod map;

pub use dual_core_types as types;

pub use map::{handle_key_event, is_back_key, menu_choice, should_quit};
