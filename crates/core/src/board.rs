//! Board module - the locked-cell grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind that locked there.
//! It is a plain `Copy` value: [`Board::lock`] and [`Board::clear_rows`] return a new board
//! and never touch the receiver, so a caller can validate against one snapshot and commit
//! another without partial edits ever being visible.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::pieces::get_shape;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Number of rows
pub const ROWS: usize = BOARD_HEIGHT as usize;

/// Number of columns
pub const COLS: usize = BOARD_WIDTH as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = ROWS * COLS;

/// Ascending set of row indices, allocation-free
pub type RowSet = ArrayVec<usize, ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * COLS + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Copy of this board with one cell replaced (out-of-bounds writes are ignored)
    pub fn with_cell(mut self, x: i8, y: i8, cell: Cell) -> Self {
        if let Some(idx) = Self::index(x, y) {
            self.cells[idx] = cell;
        }
        self
    }

    /// Build a board from text rows aligned to the bottom of the grid.
    ///
    /// Each row is read left to right; a piece letter (`I O T S Z J L`) marks a locked
    /// cell of that kind and any other character is empty. Extra rows or columns are
    /// ignored.
    ///
    /// ```
    /// use blockfall_core::Board;
    /// use blockfall_types::PieceKind;
    ///
    /// let board = Board::from_rows(&[".IIIIIIIII"]);
    /// assert_eq!(board.get(0, 19), Some(None));
    /// assert_eq!(board.get(1, 19), Some(Some(PieceKind::I)));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let first_y = ROWS.saturating_sub(rows.len());
        for (i, row) in rows.iter().rev().take(ROWS).rev().enumerate() {
            let y = (first_y + i) as i8;
            for (x, ch) in row.chars().take(COLS).enumerate() {
                let cell = PieceKind::from_str(ch.encode_utf8(&mut [0u8; 4]));
                board = board.with_cell(x as i8, y, cell);
            }
        }
        board
    }

    /// Check if a single cell is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a piece fits: all 4 cells inside the grid and on empty cells
    pub fn is_valid_pose(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        get_shape(kind, rotation)
            .iter()
            .all(|&(dx, dy)| self.is_valid(x + dx, y + dy))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        let start = y * COLS;
        self.cells[start..start + COLS].iter().all(|cell| cell.is_some())
    }

    /// Return a copy with the piece's cells locked in its color.
    ///
    /// Returns `None` (and commits nothing) if the pose is not valid on this board.
    pub fn lock(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Option<Board> {
        if !self.is_valid_pose(kind, rotation, x, y) {
            return None;
        }

        let mut next = *self;
        for &(dx, dy) in get_shape(kind, rotation).iter() {
            if let Some(idx) = Self::index(x + dx, y + dy) {
                next.cells[idx] = Some(kind);
            }
        }
        Some(next)
    }

    /// Indices of completely filled rows, ascending
    pub fn full_rows(&self) -> RowSet {
        (0..ROWS).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Return a copy with `rows` removed.
    ///
    /// Surviving rows keep their order and settle at the bottom; the vacated rows at the
    /// top are empty. Indices out of range are ignored, and order or duplicates in `rows`
    /// do not matter.
    pub fn clear_rows(&self, rows: &[usize]) -> Board {
        let mut next = Board::new();
        let mut write_y = ROWS;

        // Scan from bottom to top, copying every surviving row to the next free slot.
        for read_y in (0..ROWS).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            let src = read_y * COLS;
            let dst = write_y * COLS;
            next.cells[dst..dst + COLS].copy_from_slice(&self.cells[src..src + COLS]);
        }

        next
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the grid as kind codes (0 = empty, 1..=7 = I, O, T, S, Z, J, L)
    pub fn write_u8_grid(&self, out: &mut [[u8; COLS]; ROWS]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * COLS + x].map_or(0, |kind| kind.code());
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_lock_leaves_receiver_untouched() {
        let board = Board::new();
        let locked = board
            .lock(PieceKind::O, Rotation::North, 0, 18)
            .expect("empty board accepts the pose");

        assert_eq!(board.occupied_count(), 0);
        assert_eq!(locked.occupied_count(), 4);
        assert_eq!(locked.get(1, 18), Some(Some(PieceKind::O)));
        assert_eq!(locked.get(2, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_lock_rejects_invalid_pose() {
        let board = Board::new().with_cell(4, 19, Some(PieceKind::T));
        assert!(board.lock(PieceKind::O, Rotation::North, 2, 18).is_none());
        assert!(board.lock(PieceKind::I, Rotation::North, 7, 0).is_none());
    }

    #[test]
    fn test_clear_rows_matches_filter_then_pad() {
        let board = Board::from_rows(&["T.........", "IIIIIIIIII", "..S.......", "JJJJJJJJJJ"]);
        let rows = board.full_rows();
        assert_eq!(rows.as_slice(), &[17, 19]);

        let cleared = board.clear_rows(&rows);
        assert_eq!(cleared, Board::from_rows(&["T.........", "..S......."]));
    }

    #[test]
    fn test_write_u8_grid() {
        let board = Board::new().with_cell(5, 10, Some(PieceKind::L));
        let mut grid = [[0u8; COLS]; ROWS];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[10][5], 7);
        assert_eq!(grid.iter().flatten().filter(|&&c| c != 0).count(), 1);
    }
}
