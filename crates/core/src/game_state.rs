//! Game state module - manages the complete game state
//!
//! This module ties together the board, the catalog, the randomizer and scoring.
//! It owns the active piece, the lock-delay and line-clear state machine and the
//! menu/playing/paused/game-over gate.
//!
//! Lifecycle of a piece:
//!
//! ```text
//! Falling --blocked downward probe--> Grounded(since)
//! Grounded --successful move/rotate--> Falling, or Grounded(now) if still resting
//! Grounded --500ms elapsed--> lock --no full rows--> respawn
//!                                  \--full rows--> Clearing 1 -> 2 -> 3 -> compact -> respawn
//! ```
//!
//! Every timer compares the timestamps handed to [`GameState::tick`] and
//! [`GameState::apply_action`]; nothing counts frames.

use crate::board::{Board, RowSet};
use crate::pieces::{get_shape, try_rotate, PieceShape};
use crate::rng::BagRandomizer;
use crate::scoring::{drop_interval_ms, drop_score, level_for_score, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board cells covered by this piece
    pub fn cells(&self) -> PieceShape {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Check if all minos are at valid positions on the board
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_pose(self.kind, self.rotation, self.x, self.y)
    }

    /// Check if the piece is resting (one row lower does not fit)
    pub fn is_grounded(&self, board: &Board) -> bool {
        !self.shifted(0, 1).is_valid(board)
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Rows this piece can still fall before it rests
    pub fn drop_distance(&self, board: &Board) -> u32 {
        let mut distance: i8 = 0;
        while self.shifted(0, distance + 1).is_valid(board) {
            distance += 1;
        }
        distance as u32
    }
}

/// Lock & clear state machine phase.
///
/// Locking, compaction and respawn happen inside a single call, so only the states that
/// persist between ticks are represented.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LockPhase {
    /// The piece is free to fall (or there is no piece)
    #[default]
    Falling,
    /// A downward probe failed at `since_ms`; the piece locks once the delay has passed
    Grounded { since_ms: u64 },
    /// Full rows are animating; `phase` runs 1..=3, each lasting `CLEAR_PHASE_MS`
    Clearing {
        phase: u8,
        phase_started_ms: u64,
        rows: RowSet,
    },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    /// One-kind lookahead; `None` only before the first game starts
    next: Option<PieceKind>,
    bag: BagRandomizer,
    state: SessionState,
    phase: LockPhase,
    /// Monotonic id for spawned pieces (increments only on successful spawn).
    piece_id: u32,
    /// Monotonic game counter (increments on every start).
    game_id: u32,
    score: u32,
    level: u32,
    lines: u32,
    /// Timestamp of the last gravity step; cleared whenever gravity is not running.
    last_drop_ms: Option<u64>,
    paused_at_ms: Option<u64>,
}

impl GameState {
    /// Create a new game in the menu state with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            bag: BagRandomizer::new(seed),
            state: SessionState::Menu,
            phase: LockPhase::Falling,
            piece_id: 0,
            game_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            last_drop_ms: None,
            paused_at_ms: None,
        }
    }

    /// Start a new game. Only accepted from the menu or the game-over screen.
    ///
    /// The randomizer keeps running across games; everything else is reset.
    pub fn start(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }

        self.board = Board::new();
        self.active = None;
        self.next = None;
        self.phase = LockPhase::Falling;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.last_drop_ms = None;
        self.paused_at_ms = None;
        self.game_id = self.game_id.wrapping_add(1);
        self.state = SessionState::Playing;
        self.spawn_piece();
        true
    }

    pub fn can_start(&self) -> bool {
        matches!(self.state, SessionState::Menu | SessionState::GameOver)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> &LockPhase {
        &self.phase
    }

    /// Current clear animation phase: 0 when idle, 1..=3 while rows are clearing
    pub fn clear_phase(&self) -> u8 {
        match self.phase {
            LockPhase::Clearing { phase, .. } => phase,
            _ => 0,
        }
    }

    /// Rows currently mid-clear (empty unless animating)
    pub fn clearing_rows(&self) -> &[usize] {
        match &self.phase {
            LockPhase::Clearing { rows, .. } => rows.as_slice(),
            _ => &[],
        }
    }

    /// Gravity interval for the current level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    /// Check if the active piece is on the ground
    pub fn is_grounded(&self) -> bool {
        self.active
            .map_or(false, |piece| piece.is_grounded(&self.board))
    }

    /// Ghost projection: the active piece dropped straight to its resting row.
    ///
    /// Rendering only; has no effect on game state.
    pub fn ghost(&self) -> Option<Tetromino> {
        let active = self.active?;
        let distance = active.drop_distance(&self.board);
        Some(active.shifted(0, distance as i8))
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        self.ghost().map(|ghost| ghost.y)
    }

    /// Apply a UI command at time `now_ms`.
    ///
    /// Returns true if the command changed the game.
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) -> bool {
        match action {
            GameAction::Start => self.start(),
            GameAction::Pause => self.toggle_pause(now_ms),
            _ if !self.is_playing() => false,
            GameAction::MoveLeft => self.try_move(-1, 0, now_ms),
            GameAction::MoveRight => self.try_move(1, 0, now_ms),
            GameAction::SoftDrop => self.soft_drop(now_ms),
            GameAction::HardDrop => self.hard_drop(now_ms).is_some(),
            GameAction::RotateCw => self.rotate(1, now_ms),
            GameAction::RotateCcw => self.rotate(-1, now_ms),
        }
    }

    /// Advance timers to `now_ms`: gravity, lock delay and the clear animation.
    ///
    /// Returns true if the active piece, the phase or the board changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.is_playing() {
            self.last_drop_ms = None;
            return false;
        }

        if matches!(self.phase, LockPhase::Clearing { .. }) {
            return self.advance_clear(now_ms);
        }

        if self.active.is_none() {
            return false;
        }
        let piece_before = (self.active, self.piece_id);

        // Gravity: at most one row per tick once the interval has elapsed.
        let interval = self.drop_interval_ms() as u64;
        match self.last_drop_ms {
            None => self.last_drop_ms = Some(now_ms),
            Some(last) if now_ms.saturating_sub(last) >= interval => {
                self.last_drop_ms = Some(now_ms);
                self.try_move(0, 1, now_ms);
            }
            Some(_) => {}
        }

        // Lock delay, checked every tick independently of gravity.
        if let LockPhase::Grounded { since_ms } = self.phase {
            if now_ms.saturating_sub(since_ms) >= LOCK_DELAY_MS {
                self.lock_active(now_ms);
            }
        }

        piece_before != (self.active, self.piece_id) || self.clear_phase() != 0
    }

    fn toggle_pause(&mut self, now_ms: u64) -> bool {
        match self.state {
            SessionState::Playing => {
                self.state = SessionState::Paused;
                self.paused_at_ms = Some(now_ms);
                self.last_drop_ms = None;
                true
            }
            SessionState::Paused => {
                let paused_for = self
                    .paused_at_ms
                    .take()
                    .map_or(0, |at| now_ms.saturating_sub(at));
                self.shift_timers(paused_for);
                self.state = SessionState::Playing;
                true
            }
            SessionState::Menu | SessionState::GameOver => false,
        }
    }

    /// Push lock-delay and clear-phase start times forward by a paused span
    fn shift_timers(&mut self, by_ms: u64) {
        match &mut self.phase {
            LockPhase::Grounded { since_ms } => *since_ms += by_ms,
            LockPhase::Clearing {
                phase_started_ms, ..
            } => *phase_started_ms += by_ms,
            LockPhase::Falling => {}
        }
    }

    /// Try to move the active piece.
    ///
    /// A blocked downward move feeds the lock-delay timer instead of failing silently.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8, now_ms: u64) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if moved.is_valid(&self.board) {
            self.active = Some(moved);
            self.after_successful_move(now_ms);
            return true;
        }

        if dy > 0 {
            self.on_downward_blocked(now_ms);
        }
        false
    }

    /// Rotate by `direction` (+1 clockwise, -1 counter-clockwise) with horizontal kicks
    pub(crate) fn rotate(&mut self, direction: i8, now_ms: u64) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let result = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            direction,
            |x, y| self.board.is_valid(x, y),
        );

        if let Some((_new_shape, rotation, (dx, dy))) = result {
            self.active = Some(Tetromino {
                rotation,
                x: active.x + dx,
                y: active.y + dy,
                ..active
            });
            self.after_successful_move(now_ms);
            return true;
        }

        false
    }

    /// Single-row drop worth one point; a blocked attempt counts toward the lock delay
    pub(crate) fn soft_drop(&mut self, now_ms: u64) -> bool {
        let moved = self.try_move(0, 1, now_ms);
        if moved {
            self.add_score(drop_score(1, false));
        }
        moved
    }

    /// Drop to the resting row and lock immediately, bypassing lock delay.
    ///
    /// Returns the drop distance, or `None` if there is no piece to drop.
    pub(crate) fn hard_drop(&mut self, now_ms: u64) -> Option<u32> {
        if !self.is_playing() {
            return None;
        }
        let active = self.active?;

        let distance = active.drop_distance(&self.board);
        self.add_score(drop_score(distance, true));
        self.active = Some(active.shifted(0, distance as i8));
        self.lock_active(now_ms);
        Some(distance)
    }

    /// Any successful move or rotation restarts the lock delay: the piece either falls
    /// again or gets a fresh grounding timestamp.
    fn after_successful_move(&mut self, now_ms: u64) {
        if let LockPhase::Grounded { .. } = self.phase {
            self.phase = if self.is_grounded() {
                LockPhase::Grounded { since_ms: now_ms }
            } else {
                LockPhase::Falling
            };
        }
    }

    fn on_downward_blocked(&mut self, now_ms: u64) {
        match self.phase {
            LockPhase::Falling => {
                self.phase = LockPhase::Grounded { since_ms: now_ms };
            }
            LockPhase::Grounded { since_ms } => {
                if now_ms.saturating_sub(since_ms) >= LOCK_DELAY_MS {
                    self.lock_active(now_ms);
                }
            }
            LockPhase::Clearing { .. } => {}
        }
    }

    /// Write the active piece into the board, then respawn or start clearing
    fn lock_active(&mut self, now_ms: u64) {
        let Some(active) = self.active.take() else {
            return;
        };

        // The active pose is always valid; a rejected lock means the piece overlaps the
        // stack, which can only be resolved by ending the game.
        let Some(board) = self
            .board
            .lock(active.kind, active.rotation, active.x, active.y)
        else {
            self.end_game();
            return;
        };
        self.board = board;

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.phase = LockPhase::Falling;
            self.spawn_piece();
        } else {
            self.phase = LockPhase::Clearing {
                phase: 1,
                phase_started_ms: now_ms,
                rows,
            };
        }
    }

    /// Step the clear animation on exact phase boundaries, compacting after phase 3
    fn advance_clear(&mut self, now_ms: u64) -> bool {
        let LockPhase::Clearing {
            phase,
            phase_started_ms,
            ..
        } = &mut self.phase
        else {
            return false;
        };

        let mut advanced = false;
        while now_ms.saturating_sub(*phase_started_ms) >= CLEAR_PHASE_MS {
            if *phase >= CLEAR_PHASES {
                self.compact();
                return true;
            }
            *phase += 1;
            *phase_started_ms += CLEAR_PHASE_MS;
            advanced = true;
        }
        advanced
    }

    /// Remove the animated rows, award lines and points, respawn
    fn compact(&mut self) {
        let LockPhase::Clearing { rows, .. } = std::mem::take(&mut self.phase) else {
            return;
        };

        self.board = self.board.clear_rows(&rows);
        self.lines = self.lines.saturating_add(rows.len() as u32);
        self.add_score(line_clear_score(rows.len(), self.level));
        self.spawn_piece();
    }

    /// Promote the preview to the active piece and draw a new preview.
    ///
    /// A blocked spawn pose ends the game; this is the only game-over condition.
    fn spawn_piece(&mut self) -> bool {
        let kind = match self.next {
            Some(kind) => kind,
            None => self.bag.next_kind(),
        };
        self.next = Some(self.bag.next_kind());

        let piece = Tetromino::new(kind);
        if !piece.is_valid(&self.board) {
            self.end_game();
            return false;
        }

        self.active = Some(piece);
        self.phase = LockPhase::Falling;
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    fn end_game(&mut self) {
        self.state = SessionState::GameOver;
        self.active = None;
        self.phase = LockPhase::Falling;
        self.last_drop_ms = None;
    }

    /// Add points and recompute the level
    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.level = level_for_score(self.score);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.clearing_rows = [false; BOARD_HEIGHT as usize];
        for &row in self.clearing_rows() {
            out.clearing_rows[row] = true;
        }
        out.clear_phase = self.clear_phase();
        out.next = self.next;
        out.state = self.state;
        out.game_id = self.game_id;
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.timers = TimersSnapshot {
            drop_interval_ms: self.drop_interval_ms(),
            grounded_since_ms: match self.phase {
                LockPhase::Grounded { since_ms } => Some(since_ms),
                _ => None,
            },
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
