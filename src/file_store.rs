//! JSON file backing for the high score store.
//!
//! The file holds one flat JSON object of string values and is rewritten on every `set`.
//! Numbers are accepted on read so a hand-edited `"high_score": 1200` still loads.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::{KeyValueStore, StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Load the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let text = fs::read_to_string(&path)?;
        let values = parse_values(&text)?;
        Ok(Self { path, values })
    }

    /// Like [`JsonFileStore::open`], but an unreadable file starts empty.
    ///
    /// The next `set` overwrites whatever was there.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::open(path.clone()).unwrap_or_else(|_| Self {
            path,
            values: BTreeMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let text = serde_json::to_string_pretty(&self.values)
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

fn parse_values(text: &str) -> Result<BTreeMap<String, String>, StoreError> {
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let root: Value =
        serde_json::from_str(text).map_err(|e| StoreError::Malformed(e.to_string()))?;
    let Value::Object(map) = root else {
        return Err(StoreError::Malformed("expected a JSON object".to_string()));
    };

    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some(Ok((key, s))),
            Value::Number(n) => Some(Ok((key, n.to_string()))),
            Value::Null => None,
            other => Some(Err(StoreError::Malformed(format!(
                "unsupported value for {}: {}",
                key, other
            )))),
        })
        .collect()
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}
