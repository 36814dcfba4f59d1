//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{core,input,term,types}` and adds the pieces
//! only the terminal binary needs: argument parsing, the JSON high score file and the
//! record entry form.

pub mod config;
pub mod file_store;
pub mod record_form;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
