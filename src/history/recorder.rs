//! Capped, newest-first log of solved runs with synchronous persistence
//!
//! The log is loaded once from its store and rewritten in full after every
//! mutation. Persistence is a direct consequence of `append` and `clear`;
//! nothing observes the log for changes.

use crate::history::record::HistoryItem;
use crate::history::store::RecordStore;
use crate::io::configuration::{HISTORY_CAPACITY, HISTORY_STORAGE_KEY};
use crate::io::error::{PuzzleError, Result};

/// Vault of completed runs backed by a record store
#[derive(Debug)]
pub struct RunRecorder<S: RecordStore> {
    store: S,
    items: Vec<HistoryItem>,
    capacity: usize,
}

impl<S: RecordStore> RunRecorder<S> {
    /// Load the vault from `store`
    ///
    /// A missing, unreadable or malformed record yields an empty vault; the
    /// problem is logged and never reported to the caller.
    pub fn load(store: S) -> Self {
        Self::load_with_capacity(store, HISTORY_CAPACITY)
    }

    /// Load the vault keeping at most `capacity` items
    pub fn load_with_capacity(store: S, capacity: usize) -> Self {
        let items = match store.load(HISTORY_STORAGE_KEY) {
            Ok(Some(contents)) => match parse_items(&contents) {
                Ok(mut items) => {
                    items.truncate(capacity);
                    items
                }
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable history");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "history store unavailable; starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = items.len(), "history loaded");

        Self {
            store,
            items,
            capacity,
        }
    }

    /// Prepend a solved run, evicting the oldest beyond capacity, and persist
    ///
    /// The in-memory log keeps the new item even when persisting fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be serialized or written
    pub fn append(&mut self, item: HistoryItem) -> Result<&[HistoryItem]> {
        let mut next = Vec::with_capacity(self.capacity);
        next.push(item);
        next.extend(
            self.items
                .iter()
                .take(self.capacity.saturating_sub(1))
                .cloned(),
        );
        next.truncate(self.capacity);
        self.items = next;

        tracing::info!(count = self.items.len(), "run recorded");
        self.persist()?;
        Ok(&self.items)
    }

    /// Remove every run and persist the empty log
    ///
    /// # Errors
    ///
    /// Returns an error if the empty log cannot be written
    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        tracing::info!("history cleared");
        self.persist()
    }

    /// Runs, newest first
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    /// Look up a run by id
    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of stored runs
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the vault is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of runs kept
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Backing store
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) -> Result<()> {
        let contents =
            serde_json::to_string(&self.items).map_err(|e| PuzzleError::Serialization {
                key: HISTORY_STORAGE_KEY.to_string(),
                source: e,
            })?;
        self.store.save(HISTORY_STORAGE_KEY, &contents)
    }
}

/// Parse a serialized history log
///
/// # Errors
///
/// Returns [`PuzzleError::MalformedPersistedState`] if the record does not parse
pub fn parse_items(contents: &str) -> Result<Vec<HistoryItem>> {
    serde_json::from_str(contents).map_err(|e| PuzzleError::MalformedPersistedState {
        key: HISTORY_STORAGE_KEY.to_string(),
        source: e,
    })
}
