//! Piece catalog and rotation kick tests

use blockfall::core::pieces::{get_shape, try_rotate, KICK_OFFSETS};
use blockfall::core::Board;
use blockfall::types::{PieceKind, Rotation, SPAWN_POSITION};

#[test]
fn test_i_piece_shapes() {
    assert_eq!(
        get_shape(PieceKind::I, Rotation::North),
        [(0, 1), (1, 1), (2, 1), (3, 1)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::East),
        [(2, 0), (2, 1), (2, 2), (2, 3)]
    );
}

#[test]
fn test_o_piece_shapes() {
    let north = get_shape(PieceKind::O, Rotation::North);
    for rotation in [Rotation::East, Rotation::South, Rotation::West] {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(
        get_shape(PieceKind::T, Rotation::North),
        [(1, 0), (0, 1), (1, 1), (2, 1)]
    );
    assert_eq!(
        get_shape(PieceKind::T, Rotation::South),
        [(0, 1), (1, 1), (2, 1), (1, 2)]
    );
}

#[test]
fn test_spawn_position() {
    assert_eq!(SPAWN_POSITION, (3, 0));
    let board = Board::new();
    for kind in PieceKind::ALL {
        assert!(board.is_valid_pose(kind, Rotation::North, SPAWN_POSITION.0, SPAWN_POSITION.1));
    }
}

#[test]
fn test_all_shapes_fit_in_4x4() {
    for kind in PieceKind::ALL {
        for rotation in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            for (x, y) in get_shape(kind, rotation) {
                assert!((0..4).contains(&x) && (0..4).contains(&y), "{:?} {:?}", kind, rotation);
            }
        }
    }
}

#[test]
fn test_t_rotation_success() {
    let board = Board::new();
    let (shape, rotation, kick) =
        try_rotate(PieceKind::T, Rotation::North, 3, 5, 1, |x, y| board.is_valid(x, y)).unwrap();

    assert_eq!(rotation, Rotation::East);
    assert_eq!(kick, (0, 0));
    assert_eq!(shape, get_shape(PieceKind::T, Rotation::East));
}

#[test]
fn test_rotation_kicks_off_left_wall() {
    // I vertical (West) hugging the left wall: north would reach x = -1.
    let board = Board::new();
    let (_, rotation, kick) =
        try_rotate(PieceKind::I, Rotation::West, -1, 5, 1, |x, y| board.is_valid(x, y)).unwrap();

    assert_eq!(rotation, Rotation::North);
    assert_eq!(kick, (1, 0));
}

#[test]
fn test_rotation_kicks_off_right_wall() {
    // I vertical (East) at the right wall: north spans x..x+3 = 7..10.
    let board = Board::new();
    let (_, rotation, kick) =
        try_rotate(PieceKind::I, Rotation::East, 7, 5, -1, |x, y| board.is_valid(x, y)).unwrap();

    assert_eq!(rotation, Rotation::North);
    assert_eq!(kick, (-1, 0));
}

#[test]
fn test_rotation_failure_leaves_no_result() {
    // A vertical I in a one-wide well cannot lie down with horizontal kicks alone.
    let board = Board::from_rows(&[
        "IIII.IIIII",
        "IIII.IIIII",
        "IIII.IIIII",
        "IIII.IIIII",
    ]);
    let result = try_rotate(PieceKind::I, Rotation::East, 2, 16, 1, |x, y| board.is_valid(x, y));
    assert!(result.is_none());
}

#[test]
fn test_ccw_rotation() {
    let board = Board::new();
    let (_, rotation, _) =
        try_rotate(PieceKind::L, Rotation::North, 3, 5, -1, |x, y| board.is_valid(x, y)).unwrap();
    assert_eq!(rotation, Rotation::West);
}

#[test]
fn test_kick_table_is_horizontal_only() {
    assert_eq!(KICK_OFFSETS[0], (0, 0));
    assert!(KICK_OFFSETS.iter().all(|&(_, dy)| dy == 0));
    assert_eq!(KICK_OFFSETS, [(0, 0), (-1, 0), (1, 0), (-2, 0), (2, 0)]);
}
