//! Cosmetic particles: line-clear sparks and collision flashes.
//!
//! Nothing here feeds back into gameplay. The only invariant is that opacity
//! never goes negative; a particle is dropped in the same pass that brings its
//! opacity to zero.

use crate::rng::SimpleRng;
use crate::types::{PieceKind, CELL_PX};

const SPARK_GRAVITY: f64 = 0.2;
const SPARK_FADE: f64 = 0.02;
const SPARK_MAX_VX: f64 = 3.0;
const SPARK_MAX_VY: f64 = 5.0;

const FLASH_FADE: f64 = 0.05;
const FLASH_MAX_RADIUS: f64 = 60.0;

/// A spark thrown off a cleared cell, in grid pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub alpha: f64,
    pub color: PieceKind,
}

impl Spark {
    /// A spark centered on grid cell (col, row), flying outward and upward
    pub fn burst(col: usize, row: usize, color: PieceKind, rng: &mut SimpleRng) -> Self {
        Self {
            x: col as f64 * CELL_PX + CELL_PX / 2.0,
            y: row as f64 * CELL_PX + CELL_PX / 2.0,
            vx: (rng.next_f64() - 0.5) * 2.0 * SPARK_MAX_VX,
            vy: -rng.next_f64() * SPARK_MAX_VY,
            alpha: 1.0,
            color,
        }
    }

    fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += SPARK_GRAVITY;
        self.alpha = (self.alpha - SPARK_FADE).max(0.0);
    }
}

/// A fading burst where the vehicle hit an obstacle.
///
/// `x` is a lane coordinate (lane index + 0.5 for the lane center), `y` is
/// in traffic world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash {
    pub x: f64,
    pub y: f64,
    pub alpha: f64,
}

impl Flash {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, alpha: 1.0 }
    }

    pub fn radius(&self) -> f64 {
        FLASH_MAX_RADIUS * self.alpha
    }

    fn step(&mut self) {
        self.alpha = (self.alpha - FLASH_FADE).max(0.0);
    }
}

/// Advance every spark one frame, dropping the ones that faded out.
pub fn decay_sparks(sparks: &mut Vec<Spark>) {
    sparks.retain_mut(|s| {
        s.step();
        s.alpha > 0.0
    });
}

/// Advance every flash one frame, dropping the ones that faded out.
pub fn decay_flashes(flashes: &mut Vec<Flash>) {
    flashes.retain_mut(|f| {
        f.step();
        f.alpha > 0.0
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spark_bursts_upward_from_cell_center() {
        let mut rng = SimpleRng::new(3);
        for _ in 0..100 {
            let s = Spark::burst(2, 19, PieceKind::S, &mut rng);
            assert_eq!((s.x, s.y), (75.0, 585.0));
            assert!(s.vx >= -SPARK_MAX_VX && s.vx < SPARK_MAX_VX);
            assert!(s.vy <= 0.0 && s.vy > -SPARK_MAX_VY);
        }
    }

    #[test]
    fn sparks_fade_out_after_about_fifty_frames() {
        let mut rng = SimpleRng::new(3);
        let mut sparks = vec![Spark::burst(0, 0, PieceKind::I, &mut rng)];
        for _ in 0..45 {
            decay_sparks(&mut sparks);
        }
        assert_eq!(sparks.len(), 1);
        assert!(sparks[0].alpha > 0.0);
        for _ in 0..10 {
            decay_sparks(&mut sparks);
        }
        assert!(sparks.is_empty());
    }

    #[test]
    fn decay_never_skips_a_neighbour() {
        // Alternating nearly-dead and fresh particles: removing one must not
        // skip the update of the one after it.
        let mut flashes: Vec<Flash> = (0..6)
            .map(|i| Flash {
                x: i as f64,
                y: 0.0,
                alpha: if i % 2 == 0 { 0.05 } else { 1.0 },
            })
            .collect();
        decay_flashes(&mut flashes);

        assert_eq!(flashes.len(), 3);
        for f in &flashes {
            assert!((f.alpha - 0.95).abs() < 1e-9);
        }
    }

    #[test]
    fn flash_opacity_never_negative() {
        let mut f = Flash {
            x: 0.0,
            y: 0.0,
            alpha: 0.01,
        };
        f.step();
        assert_eq!(f.alpha, 0.0);
        assert_eq!(f.radius(), 0.0);
    }
}
