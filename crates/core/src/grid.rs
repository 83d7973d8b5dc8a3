//! Grid module - the block-puzzle playfield
//!
//! The grid is a 10x20 array where each cell is empty or holds the color tag
//! of the piece that locked there. Uses a flat array for cache locality and
//! zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

const WIDTH: usize = GRID_WIDTH as usize;

/// A row removed by [`Grid::clear_full_rows`], with the cells it held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedRow {
    /// Row index before the clear
    pub y: usize,
    pub cells: [Cell; WIDTH],
}

/// The block grid - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a piece cell may occupy (x, y).
    ///
    /// Rows above the top edge (y < 0) are open as long as the column is in
    /// bounds: a piece may poke out of the top of the grid, but never through
    /// the walls or the floor.
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
            return false;
        }
        if y < 0 {
            return true;
        }
        matches!(self.get(x, y), Some(None))
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= GRID_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Fill a whole row with one kind (test and bench setup helper)
    pub fn fill_row(&mut self, y: usize, kind: PieceKind) {
        if y >= GRID_HEIGHT as usize {
            return;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].fill(Some(kind));
    }

    /// Write every occupied cell of a shape at (x, y) with the piece's color.
    ///
    /// Cells that fall outside the grid (above the top edge) are dropped.
    pub fn merge(&mut self, cells: impl IntoIterator<Item = (i8, i8)>, kind: PieceKind) {
        for (x, y) in cells {
            self.set(x, y, Some(kind));
        }
    }

    /// Remove every full row, shifting the rows above down.
    ///
    /// Scans bottom to top with a read cursor and a write cursor: kept rows
    /// are copied down to the write cursor, full rows are skipped, and the
    /// rows left above the write cursor are emptied. Every row is examined
    /// exactly once against the pre-clear contents, so adjacent full rows are
    /// never skipped. Returned rows are ordered bottom to top and carry their
    /// original indices.
    pub fn clear_full_rows(&mut self) -> ArrayVec<ClearedRow, { GRID_HEIGHT as usize }> {
        let mut cleared = ArrayVec::new();
        let mut write_y = GRID_HEIGHT as usize;

        for read_y in (0..GRID_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                let mut cells = [None; WIDTH];
                cells.copy_from_slice(self.row(read_y));
                cleared.push(ClearedRow { y: read_y, cells });
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * WIDTH;
                    self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
                }
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
        cleared
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a grid from rows of text, bottom-aligned.
    ///
    /// `.` is empty; any piece letter fills the cell with that kind. Rows
    /// shorter than the grid are padded with empty cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        let top = (GRID_HEIGHT as usize).saturating_sub(rows.len());
        for (i, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(WIDTH).enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                grid.set(x as i8, (top + i) as i8, cell);
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn open_cells_fail_closed_at_walls_and_floor() {
        let mut grid = Grid::new();
        assert!(grid.is_open(0, 0));
        assert!(grid.is_open(4, -2));
        assert!(!grid.is_open(-1, 5));
        assert!(!grid.is_open(10, 5));
        assert!(!grid.is_open(3, 20));

        grid.set(4, 10, Some(PieceKind::Z));
        assert!(!grid.is_open(4, 10));
    }

    #[test]
    fn clear_keeps_rows_between_two_full_rows() {
        let mut grid = Grid::from_rows(&["IIIIIIIIII", "T.........", "OOOOOOOOOO"]);
        let cleared = grid.clear_full_rows();

        assert_eq!(cleared.iter().map(|r| r.y).collect::<Vec<_>>(), vec![19, 17]);
        assert_eq!(grid.get(0, 19), Some(Some(PieceKind::T)));
        assert!(grid.row(18).iter().all(|c| c.is_none()));
    }

    #[test]
    fn from_rows_is_bottom_aligned() {
        let grid = Grid::from_rows(&["J.........", "..L......."]);
        assert_eq!(grid.get(0, 18), Some(Some(PieceKind::J)));
        assert_eq!(grid.get(2, 19), Some(Some(PieceKind::L)));
        assert_eq!(grid.get(0, 19), Some(None));
    }
}
