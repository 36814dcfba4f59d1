//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The mapping depends on
//! the session state: the same key can start a game from the menu and hard-drop while
//! playing. Text entry for the record form is handled by the binary, not here.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
