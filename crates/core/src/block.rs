//! Block-grid engine - falling pieces, locking, and line clears
//!
//! Owns the grid, the current and next pieces, the drop timer, and the
//! line-clear sparks. Every move is applied to a copy of the piece and only
//! committed when the copy does not collide, so a rejected move or rotation is
//! never visible.

use tracing::{debug, warn};

use crate::grid::Grid;
use crate::particles::{decay_sparks, Spark};
use crate::pieces::Piece;
use crate::rng::SimpleRng;
use crate::types::BASE_DROP_MS;

/// Draw a uniformly random kind and place it at the spawn anchor.
pub fn spawn_piece(rng: &mut SimpleRng) -> Piece {
    Piece::new(rng.next_kind())
}

/// True when any occupied cell of `piece` is outside the walls or floor, or
/// overlaps a filled grid cell. Out-of-bounds lookups count as blocked.
pub fn collides(piece: &Piece, grid: &Grid) -> bool {
    piece.cells().any(|(x, y)| !grid.is_open(x, y))
}

/// What happened when a piece was pushed down one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved down
    Moved,
    /// The piece could not move, so it was merged into the grid
    Locked(LockEvent),
    /// The engine already topped out; nothing changed
    Inert,
}

/// Result of merging a piece into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// The promoted piece collides at its spawn position
    pub topped_out: bool,
}

#[derive(Debug, Clone)]
pub struct BlockEngine {
    grid: Grid,
    current: Piece,
    next: Piece,
    rng: SimpleRng,
    drop_timer_ms: f64,
    speed_multiplier: f64,
    topped_out: bool,
    sparks: Vec<Spark>,
}

impl BlockEngine {
    /// Empty grid, two fresh pieces
    pub fn new(rng: SimpleRng) -> Self {
        Self::with_grid(Grid::new(), rng)
    }

    /// Start from existing grid content.
    ///
    /// If the first piece already collides at its spawn position the engine
    /// is topped out from the start, without waiting for a drop.
    pub fn with_grid(grid: Grid, mut rng: SimpleRng) -> Self {
        let current = spawn_piece(&mut rng);
        let next = spawn_piece(&mut rng);
        let topped_out = collides(&current, &grid);
        if topped_out {
            warn!(kind = current.kind.as_str(), "spawn position blocked");
        }
        Self {
            grid,
            current,
            next,
            rng,
            drop_timer_ms: 0.0,
            speed_multiplier: 1.0,
            topped_out,
            sparks: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn topped_out(&self) -> bool {
        self.topped_out
    }

    pub fn drop_timer_ms(&self) -> f64 {
        self.drop_timer_ms
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Scale the auto-drop rate; non-positive or non-finite values are ignored
    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        if multiplier.is_finite() && multiplier > 0.0 {
            self.speed_multiplier = multiplier;
        }
    }

    /// Auto-drop interval at the current speed multiplier
    pub fn drop_interval_ms(&self) -> f64 {
        BASE_DROP_MS / self.speed_multiplier
    }

    /// Shift the current piece; reverts (returns false) on collision
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.topped_out {
            return false;
        }
        let moved = self.current.moved(dx, dy);
        if collides(&moved, &self.grid) {
            return false;
        }
        self.current = moved;
        true
    }

    /// Rotate the current piece clockwise; reverts (returns false) on collision
    pub fn try_rotate(&mut self) -> bool {
        if self.topped_out {
            return false;
        }
        let rotated = self.current.rotated();
        if collides(&rotated, &self.grid) {
            return false;
        }
        self.current = rotated;
        true
    }

    /// Move the current piece down one row, locking it if it cannot move.
    ///
    /// Locking merges the piece, clears full lines, promotes the next piece,
    /// and draws a new next piece. If the promoted piece collides where it
    /// spawned, the engine tops out. The drop timer restarts either way.
    pub fn soft_drop(&mut self) -> DropOutcome {
        if self.topped_out {
            return DropOutcome::Inert;
        }
        self.drop_timer_ms = 0.0;

        if self.try_move(0, 1) {
            return DropOutcome::Moved;
        }

        self.grid.merge(self.current.cells(), self.current.kind);
        let lines_cleared = self.clear_lines();

        self.current = self.next;
        self.next = spawn_piece(&mut self.rng);

        if collides(&self.current, &self.grid) {
            self.topped_out = true;
            warn!(kind = self.current.kind.as_str(), "grid topped out");
        }

        DropOutcome::Locked(LockEvent {
            lines_cleared,
            topped_out: self.topped_out,
        })
    }

    /// Remove all full rows, throwing a spark off every cleared cell.
    ///
    /// Returns the number of rows removed. The grid keeps its height: one
    /// empty row enters at the top for each row removed.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.grid.clear_full_rows();
        for row in &cleared {
            for (x, cell) in row.cells.iter().enumerate() {
                if let Some(color) = cell {
                    self.sparks
                        .push(Spark::burst(x, row.y, *color, &mut self.rng));
                }
            }
        }
        if !cleared.is_empty() {
            debug!(lines = cleared.len(), "lines cleared");
        }
        cleared.len() as u32
    }

    /// Accumulate frame time and auto-drop once the interval is exceeded.
    pub fn tick(&mut self, elapsed_ms: f64) -> Option<DropOutcome> {
        if self.topped_out {
            return None;
        }
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.drop_timer_ms += elapsed_ms;
        }
        if self.drop_timer_ms > self.drop_interval_ms() {
            return Some(self.soft_drop());
        }
        None
    }

    pub fn decay_sparks(&mut self) {
        decay_sparks(&mut self.sparks);
    }

    #[doc(hidden)]
    pub fn set_current(&mut self, piece: Piece) {
        self.current = piece;
    }

    #[doc(hidden)]
    pub fn set_next(&mut self, piece: Piece) {
        self.next = piece;
    }
}
