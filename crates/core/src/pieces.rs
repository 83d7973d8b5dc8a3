//! Pieces module - block shapes and rotation
//!
//! Each of the seven kinds maps to a small boolean matrix held in a
//! compile-time table. Rotation is a clockwise transpose-and-reverse of that
//! matrix; there are no wall kicks, a blocked rotation simply does not happen.

use crate::types::{PieceKind, SPAWN_POSITION};

/// Largest side of any shape matrix
pub const MAX_SHAPE_SIDE: usize = 4;

/// A shape matrix of at most 4x4 cells.
///
/// Only the top-left `rows x cols` region is meaningful; everything outside
/// it is always `false`, so two shapes compare equal exactly when their
/// matrices do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from `rows` strings of `1`/`0` (const so the table below
    /// is evaluated at compile time).
    const fn parse(rows: &[&[u8]]) -> Self {
        let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let mut r = 0;
        let mut cols = 0;
        while r < rows.len() {
            let row = rows[r];
            let mut c = 0;
            while c < row.len() {
                bits[r][c] = row[c] == b'1';
                c += 1;
            }
            if row.len() > cols {
                cols = row.len();
            }
            r += 1;
        }
        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            bits,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.bits[row][col]
    }

    /// Occupied cells as (dx, dy) offsets from the anchor
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.bits[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Rotate 90° clockwise: row `i` of the result is column `i` of the
    /// source read bottom to top.
    pub fn rotated_cw(&self) -> Self {
        let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let rows = self.rows as usize;
        for (r, row) in bits.iter_mut().enumerate().take(self.cols as usize) {
            for (c, bit) in row.iter_mut().enumerate().take(rows) {
                *bit = self.bits[rows - 1 - c][r];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

/// Shape table, indexed in [`PieceKind::ALL`] order
const SHAPES: [Shape; 7] = [
    Shape::parse(&[b"1111"]),
    Shape::parse(&[b"11", b"11"]),
    Shape::parse(&[b"010", b"111"]),
    Shape::parse(&[b"011", b"110"]),
    Shape::parse(&[b"110", b"011"]),
    Shape::parse(&[b"100", b"111"]),
    Shape::parse(&[b"001", b"111"]),
];

/// Spawn shape for a kind
pub fn shape_of(kind: PieceKind) -> Shape {
    let idx = match kind {
        PieceKind::I => 0,
        PieceKind::O => 1,
        PieceKind::T => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::J => 5,
        PieceKind::L => 6,
    };
    SHAPES[idx]
}

/// A piece: shape, color tag (its kind), and grid anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// A fresh piece at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: shape_of(kind),
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Occupied cells in grid coordinates
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(shape_of(kind).cells().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn i_bar_rotates_to_a_column() {
        let bar = shape_of(PieceKind::I);
        assert_eq!((bar.rows(), bar.cols()), (1, 4));

        let column = bar.rotated_cw();
        assert_eq!((column.rows(), column.cols()), (4, 1));
        assert_eq!(column.cells().collect::<Vec<_>>(), vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn t_rotates_clockwise() {
        // 010      10
        // 111  ->  11
        //          10
        let t = shape_of(PieceKind::T).rotated_cw();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert!(t.get(0, 0) && !t.get(0, 1));
        assert!(t.get(1, 0) && t.get(1, 1));
        assert!(t.get(2, 0) && !t.get(2, 1));
    }

    #[test]
    fn four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let s = shape_of(kind);
            assert_eq!(s.rotated_cw().rotated_cw().rotated_cw().rotated_cw(), s);
        }
    }

    #[test]
    fn new_piece_spawns_at_anchor() {
        let p = Piece::new(PieceKind::L);
        assert_eq!((p.x, p.y), SPAWN_POSITION);
        assert_eq!(p.cells().collect::<Vec<_>>(), vec![(5, 0), (3, 1), (4, 1), (5, 1)]);
    }
}
