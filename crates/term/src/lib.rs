//! Terminal "game renderer" module.
//!
//! Renders both halves of the game into a plain framebuffer that is diffed
//! and flushed to the terminal, without any widget or layout library.
//!
//! - [`FrameBuffer`] holds styled cells, two columns per grid cell
//! - [`DualView`] implements the session's presenter by drawing into it
//! - [`TerminalRenderer`] writes only the cells that changed

pub mod dual_view;
pub mod fb;
pub mod renderer;

pub use dual_core_core as core;
pub use dual_core_engine as engine;
pub use dual_core_types as types;

pub use dual_view::{DualView, VIEW_HEIGHT, VIEW_WIDTH};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
