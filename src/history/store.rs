//! Keyed record storage backing the vault
//!
//! A store holds opaque string records under fixed keys, the way browser
//! local storage does. The file store writes each key to its own JSON file
//! through a temporary file and a rename, so a crash mid-write never leaves a
//! truncated record behind.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::io::error::{PuzzleError, Result};

/// Durable string storage addressed by key
pub trait RecordStore {
    /// Read the record stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the record stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written
    fn save(&mut self, key: &str, contents: &str) -> Result<()>;
}

/// Directory-backed store with one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    dir: PathBuf,
}

impl FileRecordStore {
    /// Store records under `dir`, created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the records
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PuzzleError::FileSystem {
                path,
                operation: "read record",
                source: e,
            }),
        }
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| PuzzleError::FileSystem {
            path: self.dir.clone(),
            operation: "create directory",
            source: e,
        })?;

        let path = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&staging, contents).map_err(|e| PuzzleError::FileSystem {
            path: staging.clone(),
            operation: "write record",
            source: e,
        })?;
        fs::rename(&staging, &path).map_err(|e| PuzzleError::FileSystem {
            path,
            operation: "replace record",
            source: e,
        })
    }
}

/// In-memory store, used by tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: HashMap<String, String>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one record
    pub fn with_record(key: &str, contents: &str) -> Self {
        let mut records = HashMap::new();
        records.insert(key.to_string(), contents.to_string());
        Self { records }
    }

    /// Peek at a stored record without going through the trait
    pub fn get(&self, key: &str) -> Option<&str> {
        self.records.get(key).map(String::as_str)
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<()> {
        self.records.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
