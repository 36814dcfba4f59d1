use crate::game_state::Tetromino;
use crate::pieces::{cells_at, PieceShape};
use crate::types::{PieceKind, Rotation, SessionState, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Absolute board cells of the piece
    pub fn cells(&self) -> PieceShape {
        cells_at(self.kind, self.rotation, self.x, self.y)
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    pub drop_interval_ms: u32,
    /// Set while the active piece is waiting out its lock delay
    pub grounded_since_ms: Option<u64>,
}

/// Read-only copy of everything a view needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Kind codes, 0 = empty
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub clearing_rows: [bool; BOARD_HEIGHT as usize],
    pub clear_phase: u8,
    pub next: Option<PieceKind>,
    pub state: SessionState,
    pub game_id: u32,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub high_score: u32,
    /// A new record is waiting for a holder name
    pub record_pending: bool,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Playing && self.clear_phase == 0
    }

    /// Cells of the ghost projection, if there is an active piece
    pub fn ghost_cells(&self) -> Option<PieceShape> {
        let active = self.active?;
        let ghost_y = self.ghost_y?;
        Some(cells_at(active.kind, active.rotation, active.x, ghost_y))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            clearing_rows: [false; BOARD_HEIGHT as usize],
            clear_phase: 0,
            next: None,
            state: SessionState::Menu,
            game_id: 0,
            piece_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            high_score: 0,
            record_pending: false,
            timers: TimersSnapshot::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameState;

    #[test]
    fn default_snapshot_is_menu() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.state, SessionState::Menu);
        assert!(!snap.playable());
        assert!(snap.ghost_cells().is_none());
    }

    #[test]
    fn snapshot_into_reuses_buffer() {
        let mut state = GameState::new(7);
        state.start();

        let mut snap = GameSnapshot::default();
        state.snapshot_into(&mut snap);
        assert!(snap.playable());
        assert_eq!(snap.piece_id, 1);

        let ghost = snap.ghost_cells().unwrap();
        let active = snap.active.unwrap();
        assert_eq!(ghost.map(|(x, _)| x), active.cells().map(|(x, _)| x));
        assert!(ghost.iter().any(|&(_, y)| y == 19));
    }
}
