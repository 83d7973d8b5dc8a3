//! Frame scheduler - drives both simulations once per rendered frame
//!
//! The core crate knows nothing about time or phases. This crate owns the
//! session phase machine, the frame-delta normalization, the named timer
//! table, and the collaborator traits a host implements to draw, play sounds,
//! and record final scores.
//!
//! # Example
//!
//! ```
//! use dual_core_engine::{GameSession, SessionConfig};
//! use dual_core_engine::types::Phase;
//!
//! let session = GameSession::new(SessionConfig::default());
//! assert_eq!(session.phase(), Phase::Menu);
//! ```

pub mod delta;
pub mod ports;
pub mod session;
pub mod timers;

pub use dual_core_core as core;
pub use dual_core_types as types;

pub use delta::{clamp_delta, normalize_frame_delta};
pub use ports::{AudioSink, Host, Presenter, ScoreReporter};
pub use session::{GameSession, Run, RunSummary, SessionConfig};
pub use timers::{TimerName, TimerTable};
