//! Dual Core (workspace facade crate).
//!
//! Re-exports the member crates as `dual_core::{adapter, core, engine, input,
//! term, types}` and adds [`host::TerminalHost`], the collaborator bundle the
//! terminal binary hands to the session.

pub mod host;

pub use dual_core_adapter as adapter;
pub use dual_core_core as core;
pub use dual_core_engine as engine;
pub use dual_core_input as input;
pub use dual_core_term as term;
pub use dual_core_types as types;
