//! Search history
//!
//! A capped, most-recent-first list of past queries. The list itself is plain
//! data; where it lives is decided by the [`HistoryStore`] handed in by the
//! caller.

mod store;

pub use store::{HistoryError, HistoryStore, JsonFileStore, MemoryStore, HISTORY_KEY};

/// How many queries are remembered by default
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Past search queries, most recent first
#[derive(Debug)]
pub struct SearchHistory<S: HistoryStore> {
    store: S,
    entries: Vec<String>,
    limit: usize,
}

impl<S: HistoryStore> SearchHistory<S> {
    /// Read the saved history from `store`.
    ///
    /// A history that cannot be read starts out empty; it is rewritten on the
    /// next recorded search.
    pub fn open(store: S, limit: usize) -> Self {
        let mut entries = match store.load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Discarding unreadable search history: {}", e);
                Vec::new()
            }
        };
        entries.truncate(limit);

        Self {
            store,
            entries,
            limit,
        }
    }

    /// Remember `query` as the most recent search and persist the list.
    ///
    /// Blank queries are ignored. An exact (case-sensitive) duplicate is
    /// moved to the front instead of being stored twice.
    pub fn record(&mut self, query: &str) -> Result<(), HistoryError> {
        if query.trim().is_empty() {
            return Ok(());
        }

        self.entries.retain(|q| q != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.limit);

        tracing::debug!("Recorded search {:?} ({} in history)", query, self.entries.len());
        self.store.save(&self.entries)
    }

    /// Forget every query
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        self.store.clear()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
