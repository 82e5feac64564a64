//! Persistence for the search history

use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key under which the history list is stored
pub const HISTORY_KEY: &str = "searchHistory";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history store I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Named-key storage holding the serialized history list
pub trait HistoryStore {
    /// Saved queries, most recent first; empty when nothing was saved
    fn load(&self) -> Result<Vec<String>, HistoryError>;

    /// Replace the saved list
    fn save(&self, entries: &[String]) -> Result<(), HistoryError>;

    /// Remove the saved list
    fn clear(&self) -> Result<(), HistoryError>;
}

/// In-memory store; nothing outlives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<Vec<String>>,
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self.entries.borrow().clone())
    }

    fn save(&self, entries: &[String]) -> Result<(), HistoryError> {
        *self.entries.borrow_mut() = entries.to_vec();
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

/// JSON key-value document on disk.
///
/// The history lives under [`HISTORY_KEY`]; other keys in the document are
/// left untouched.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>, HistoryError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => {
                tracing::warn!("{:?} does not hold a JSON object, starting fresh", self.path);
                Ok(Map::new())
            }
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }

        let content = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, content).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<String>, HistoryError> {
        let mut document = self.read_document()?;
        match document.remove(HISTORY_KEY) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, entries: &[String]) -> Result<(), HistoryError> {
        let mut document = self.read_document().unwrap_or_else(|e| {
            tracing::warn!("Overwriting unreadable history store: {}", e);
            Map::new()
        });
        document.insert(HISTORY_KEY.to_string(), serde_json::to_value(entries)?);
        self.write_document(&document)
    }

    fn clear(&self) -> Result<(), HistoryError> {
        let mut document = self.read_document()?;
        if document.remove(HISTORY_KEY).is_none() {
            return Ok(());
        }

        if document.is_empty() {
            fs::remove_file(&self.path).map_err(|source| self.io_error(source))?;
            tracing::info!("Deleted: {:?}", self.path);
            Ok(())
        } else {
            self.write_document(&document)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("history.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/history.json"));
        store.save(&entries(&["b", "a"])).unwrap();

        assert_eq!(store.load().unwrap(), vec!["b", "a"]);

        let raw = fs::read_to_string(store.path()).unwrap();
        let doc: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc[HISTORY_KEY], serde_json::json!(["b", "a"]));
    }

    #[test]
    fn test_other_keys_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let store = JsonFileStore::new(&path);
        store.save(&entries(&["q"])).unwrap();
        store.clear().unwrap();

        let doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["theme"], "dark");
        assert!(doc.get(HISTORY_KEY).is_none());
    }

    #[test]
    fn test_clear_removes_file_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("history.json"));
        store.save(&entries(&["q"])).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(HistoryError::Json(_))));

        // saving replaces the unreadable document
        store.save(&entries(&["fresh"])).unwrap();
        assert_eq!(store.load().unwrap(), vec!["fresh"]);
    }
}
