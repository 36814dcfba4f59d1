//! Pieces module - piece catalog and rotation kicks
//!
//! Every kind has four rotation states, each a fixed set of 4 (x, y) offsets from the
//! piece origin (y grows downward). The catalog is immutable process-wide data.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Catalog indexed by `[kind.code() - 1][rotation.index()]`
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[(kind.code() - 1) as usize][rotation.index() as usize]
}

/// Shape lookup by raw rotation index (taken modulo 4)
pub fn shape_at(kind: PieceKind, rotation_index: u8) -> PieceShape {
    get_shape(kind, Rotation::from_index(rotation_index))
}

/// Absolute board cells covered by a piece at the given pose
pub fn cells_at(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> PieceShape {
    get_shape(kind, rotation).map(|(dx, dy)| (x + dx, y + dy))
}

/// Horizontal kick offsets tried in order after a rotation.
///
/// There are no vertical kicks and no per-piece tables; the first offset that fits wins.
pub const KICK_OFFSETS: [MinoOffset; 5] = [(0, 0), (-1, 0), (1, 0), (-2, 0), (2, 0)];

/// Try to rotate a piece by `direction` (+1 clockwise, -1 counter-clockwise).
///
/// `is_valid` reports whether a single board cell is inside the grid and empty.
/// Returns `Some((new_shape, new_rotation, kick_offset))` for the first kick that fits,
/// `None` if every kick collides.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    direction: i8,
    is_valid: impl Fn(i8, i8) -> bool,
) -> Option<(PieceShape, Rotation, MinoOffset)> {
    let new_rotation = rotation.rotate(direction);
    let new_shape = get_shape(kind, new_rotation);

    KICK_OFFSETS.iter().copied().find_map(|(dx, dy)| {
        let fits = new_shape
            .iter()
            .all(|&(mx, my)| is_valid(x + dx + mx, y + dy + my));
        fits.then_some((new_shape, new_rotation, (dx, dy)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rotation_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let shape = shape_at(kind, r);
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(shape[i], shape[j], "{:?} rotation {} repeats a cell", kind, r);
                    }
                }
            }
        }
    }

    #[test]
    fn rotation_index_is_taken_modulo_four() {
        for kind in PieceKind::ALL {
            assert_eq!(shape_at(kind, 4), shape_at(kind, 0));
            assert_eq!(shape_at(kind, 7), shape_at(kind, 3));
        }
    }

    #[test]
    fn kick_prefers_left_before_right() {
        // Blocking (4, 5) rejects the unkicked pose; both -1 and +1 fit, -1 is tried first.
        let result = try_rotate(PieceKind::T, Rotation::North, 3, 5, 1, |x, y| (x, y) != (4, 5));
        let (_, rotation, kick) = result.expect("a kick should fit");
        assert_eq!(rotation, Rotation::East);
        assert_eq!(kick, (-1, 0));
    }

    #[test]
    fn kick_fails_when_nothing_fits() {
        assert!(try_rotate(PieceKind::L, Rotation::North, 3, 5, -1, |_, _| false).is_none());
    }
}
