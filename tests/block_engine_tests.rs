//! Block engine tests - collision, rotation, locking, and top-out

use dual_core::core::{collides, BlockEngine, DropOutcome, Grid, LockEvent, Piece, SimpleRng};
use dual_core::types::PieceKind;

fn engine_with(rows: &[&str]) -> BlockEngine {
    BlockEngine::with_grid(Grid::from_rows(rows), SimpleRng::new(7))
}

#[test]
fn test_collides_in_bounds_empty() {
    let grid = Grid::new();
    for kind in PieceKind::ALL {
        assert!(!collides(&Piece::new(kind), &grid), "{kind:?}");
    }
}

#[test]
fn test_collides_out_of_bounds() {
    let grid = Grid::new();
    let piece = Piece::new(PieceKind::O);
    assert!(collides(&piece.moved(-4, 0), &grid));
    assert!(collides(&piece.moved(6, 0), &grid));
    assert!(collides(&piece.moved(0, 19), &grid));
    // Above the top edge is not a collision.
    assert!(!collides(&piece.moved(0, -1), &grid));
}

#[test]
fn test_collides_with_filled_cell() {
    let grid = Grid::from_rows(&["...Z......"]);
    let piece = Piece::new(PieceKind::O).moved(0, 18);
    assert!(collides(&piece, &grid));
    assert!(!collides(&piece.moved(0, -1), &grid));
}

#[test]
fn test_failed_rotation_leaves_piece_unchanged() {
    let mut e = BlockEngine::new(SimpleRng::new(1));
    // A flat I bar resting on the floor cannot stand up.
    let bar = Piece::new(PieceKind::I).moved(0, 19);
    e.set_current(bar);
    assert!(!e.try_rotate());
    assert_eq!(*e.current(), bar);
}

#[test]
fn test_rotation_against_wall_is_rejected() {
    let mut e = BlockEngine::new(SimpleRng::new(1));
    // Vertical I against the right wall: rotating back to flat would poke out.
    let column = Piece::new(PieceKind::I).rotated().moved(6, 5);
    e.set_current(column);
    assert!(!e.try_rotate());
    assert_eq!(*e.current(), column);
}

#[test]
fn test_soft_drop_locks_on_floor_and_clears() {
    let mut e = engine_with(&["IIII.IIIII"]);
    // Vertical I dropped into the single gap.
    let column = Piece::new(PieceKind::I).rotated().moved(1, 16);
    assert_eq!(column.cells().collect::<Vec<_>>()[0], (4, 16));
    e.set_current(column);
    let next = *e.next();

    assert_eq!(e.soft_drop(), DropOutcome::Locked(LockEvent {
        lines_cleared: 1,
        topped_out: false,
    }));
    assert_eq!(e.current().kind, next.kind);
    assert_eq!(e.sparks().len(), 10);
    // The three remaining I cells fell down by one row.
    assert_eq!(e.grid().get(4, 19), Some(Some(PieceKind::I)));
    assert_eq!(e.grid().get(4, 17), Some(Some(PieceKind::I)));
    assert_eq!(e.grid().get(4, 16), Some(None));
}

#[test]
fn test_two_full_rows_cleared_by_one_lock() {
    let mut e = engine_with(&["OOOOOOOO..", "OOOOOOOO.."]);
    e.set_current(Piece::new(PieceKind::O).moved(5, 18));
    match e.soft_drop() {
        DropOutcome::Locked(lock) => assert_eq!(lock.lines_cleared, 2),
        other => panic!("expected lock, got {other:?}"),
    }
    assert!(e.grid().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_spawn_top_out_on_blocked_anchor() {
    let rows: Vec<&str> = std::iter::repeat("ZZZZZZZZZ.").take(20).collect();
    let e = engine_with(&rows);
    assert!(e.topped_out());
}

#[test]
fn test_lock_that_blocks_spawn_tops_out() {
    let rows: Vec<&str> = std::iter::repeat("ZZZZZZZZZ.").take(18).collect();
    let mut e = engine_with(&rows);
    assert!(!e.topped_out());
    e.set_current(Piece::new(PieceKind::O));

    match e.soft_drop() {
        DropOutcome::Locked(lock) => assert!(lock.topped_out),
        other => panic!("expected lock, got {other:?}"),
    }
    assert!(e.topped_out());
    assert_eq!(e.soft_drop(), DropOutcome::Inert);
    assert_eq!(e.tick(10_000.0), None);
    assert!(!e.try_move(1, 0));
}

#[test]
fn test_same_seed_same_pieces() {
    let a = BlockEngine::new(SimpleRng::new(42));
    let b = BlockEngine::new(SimpleRng::new(42));
    assert_eq!(a.current(), b.current());
    assert_eq!(a.next(), b.next());
}
