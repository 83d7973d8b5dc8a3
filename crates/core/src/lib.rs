//! Core simulation - pure, deterministic, and testable
//!
//! This crate holds both sub-games and the state they share. It has **no I/O**
//! and no clock of its own: time comes in as arguments, randomness comes from
//! seeded generators, so the same seed and inputs replay the same run.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 block grid with full-row clearing
//! - [`pieces`]: the seven shape matrices and clockwise rotation
//! - [`block`]: block-grid engine (spawn, move, rotate, drop, lock, clear)
//! - [`traffic`]: lane traffic engine (obstacles, vehicle, collisions)
//! - [`particles`]: cosmetic sparks and flashes
//! - [`run_state`]: score, lives, run clock, feedback message
//! - [`rng`]: seeded LCG
//!
//! # Example
//!
//! ```
//! use dual_core_core::{BlockEngine, DropOutcome, SimpleRng};
//!
//! let mut blocks = BlockEngine::new(SimpleRng::new(12345));
//! assert!(blocks.try_move(1, 0));
//! assert_eq!(blocks.soft_drop(), DropOutcome::Moved);
//!
//! // 800ms at speed 1: the next tick past the interval drops the piece.
//! assert_eq!(blocks.tick(801.0), Some(DropOutcome::Moved));
//! ```

pub mod block;
pub mod grid;
pub mod particles;
pub mod pieces;
pub mod rng;
pub mod run_state;
pub mod traffic;

pub use dual_core_types as types;

pub use block::{collides, spawn_piece, BlockEngine, DropOutcome, LockEvent};
pub use grid::{ClearedRow, Grid};
pub use particles::{Flash, Spark};
pub use pieces::{shape_of, Piece, Shape};
pub use rng::SimpleRng;
pub use run_state::{Feedback, RunState, FEEDBACK_RED};
pub use traffic::{Collision, Obstacle, TrafficEngine, Vehicle};
