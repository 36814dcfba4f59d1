//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, the lock/clear state machine and the session
//! controller. It has **no dependencies** on UI, terminal or file I/O; persistence is
//! reached only through the [`KeyValueStore`] trait.
//!
//! - **Deterministic**: the same seed and the same timestamped inputs produce the same game
//! - **Frame-rate independent**: every timer compares millisecond timestamps, never tick counts
//! - **Single mutator**: one owner drives [`GameState::tick`] and
//!   [`GameState::apply_action`]; there is no interior mutability and no locking
//!
//! # Module Structure
//!
//! - [`pieces`]: piece catalog (4 rotation states per kind) and the rotation kick search
//! - [`rng`]: seedable LCG and the 7-bag randomizer
//! - [`board`]: 10x20 value-type grid with collision tests, full-row detection and compaction
//! - [`scoring`]: drop and line-clear points, level and gravity interval
//! - [`game_state`]: active piece control, lock delay, line-clear phases, respawn
//! - [`session`]: menu/playing/paused/game-over gating plus the high score boundary
//! - [`store`]: key-value persistence contract and the high score record
//! - [`snapshot`]: copyable read-only view for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, SessionState};
//!
//! let mut game = GameState::new(12345);
//! assert!(game.apply_action(GameAction::Start, 0));
//! assert_eq!(game.state(), SessionState::Playing);
//!
//! game.apply_action(GameAction::MoveRight, 0);
//! game.apply_action(GameAction::HardDrop, 0);
//!
//! // Hard drop awards two points per row travelled.
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`] once per displayed frame with a monotonic timestamp in
//! milliseconds. Gravity moves the piece at most one row per tick once the level's drop
//! interval has elapsed; a resting piece locks 500ms after it grounded; each of the three
//! line-clear phases lasts 120ms.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod store;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RowSet};
pub use game_state::{GameState, LockPhase, Tetromino};
pub use pieces::{get_shape, try_rotate, PieceShape};
pub use rng::{BagRandomizer, SimpleRng};
pub use scoring::{drop_interval_ms, drop_score, level_for_score, line_clear_score};
pub use session::Session;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use store::{HighScoreRecord, KeyValueStore, MemoryStore, StoreError};
