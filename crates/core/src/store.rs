//! Store module - key-value persistence and the high score record
//!
//! The engine never touches a file directly. Hosts hand it something that implements
//! [`KeyValueStore`]; the terminal app uses a JSON file, tests use [`MemoryStore`].
//! Values are strings; the high score is stored as its decimal text.

use std::collections::HashMap;
use std::io;

use crate::types::ANONYMOUS_NAME;

pub const KEY_HIGH_SCORE: &str = "high_score";
pub const KEY_HIGH_SCORE_NAME: &str = "high_score_name";
pub const KEY_HIGH_SCORE_COUNTRY: &str = "high_score_country";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("store contents are malformed: {0}")]
    Malformed(String),
    #[error("store is unavailable")]
    Unavailable,
}

/// Persistent string map
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Best score ever persisted and who holds it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighScoreRecord {
    pub score: u32,
    pub name: Option<String>,
    pub country: Option<String>,
}

impl HighScoreRecord {
    /// Read the record from a store.
    ///
    /// Missing, unreadable or non-numeric values read as an empty record (score 0); an
    /// empty name or country reads as none.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let score = store
            .get(KEY_HIGH_SCORE)
            .ok()
            .flatten()
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(0);
        let text = |key: &str| store.get(key).ok().flatten().filter(|value| !value.is_empty());
        let name = text(KEY_HIGH_SCORE_NAME);
        let country = text(KEY_HIGH_SCORE_COUNTRY);

        Self {
            score,
            name,
            country,
        }
    }

    /// Holder name for display
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS_NAME,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Store whose every call fails
    pub(crate) struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn empty_store_loads_zero_record() {
        let record = HighScoreRecord::load(&MemoryStore::new());
        assert_eq!(record, HighScoreRecord::default());
        assert_eq!(record.display_name(), "Anonymous");
    }

    #[test]
    fn load_reads_all_three_keys() {
        let mut store = MemoryStore::new();
        store.set(KEY_HIGH_SCORE, "4200").unwrap();
        store.set(KEY_HIGH_SCORE_NAME, "Ada").unwrap();
        store.set(KEY_HIGH_SCORE_COUNTRY, "UK").unwrap();

        let record = HighScoreRecord::load(&store);
        assert_eq!(record.score, 4200);
        assert_eq!(record.display_name(), "Ada");
        assert_eq!(record.country.as_deref(), Some("UK"));
    }

    #[test]
    fn garbage_score_reads_as_zero() {
        let mut store = MemoryStore::new();
        store.set(KEY_HIGH_SCORE, "lots").unwrap();
        assert_eq!(HighScoreRecord::load(&store).score, 0);
    }

    #[test]
    fn failing_store_reads_as_empty() {
        assert_eq!(HighScoreRecord::load(&BrokenStore), HighScoreRecord::default());
    }

    #[test]
    fn errors_render_readably() {
        let err = StoreError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.to_string(), "store i/o failed: denied");
        assert_eq!(StoreError::Unavailable.to_string(), "store is unavailable");
    }
}
