//! Key-value storage backends
//!
//! The ledger persists all state through the `KeyValueStore` trait: a durable
//! mapping from byte-string keys to byte-string values. Two implementations
//! are provided: an in-memory store for tests and embedding, and a JSON
//! snapshot store for the CLI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Durable byte-keyed storage consumed by the ledger.
///
/// Absence of a key is meaningful to callers (a missing balance reads as
/// zero), so `get` returns `Option` rather than an error. Writes are
/// infallible; durability is the backend's concern (see [`FileStore::save`]).
pub trait KeyValueStore {
    /// Get the value stored under `key`, if any
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &[u8], value: Vec<u8>);

    /// Check whether `key` holds a value
    fn has(&self, key: &[u8]) -> bool;
}

/// In-memory key-value store backed by a `BTreeMap`.
///
/// The ordered map keeps iteration deterministic, which makes storage dumps
/// and test assertions stable across runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    map: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Dump all entries as (hex key, hex value) pairs for inspection
    pub fn dump(&self) -> Vec<(String, String)> {
        self.map
            .iter()
            .map(|(k, v)| (hex::encode(k), hex::encode(v)))
            .collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.map.insert(key.to_vec(), value);
    }

    fn has(&self, key: &[u8]) -> bool {
        self.map.contains_key(key)
    }
}

/// On-disk snapshot of a store, with keys and values hex-encoded so the
/// JSON file stays readable and diffable.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    entries: BTreeMap<String, String>,
}

/// File store configuration
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    pub data_dir: PathBuf,
    pub store_file: String,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".ledger_data"),
            store_file: "store.json".to_string(),
        }
    }
}

/// Key-value store persisted as a JSON snapshot on disk.
///
/// Reads and writes go through an in-memory map; `save` serializes the whole
/// map to a temporary file and atomically renames it over the previous
/// snapshot, so a crash mid-save never leaves a torn file behind.
#[derive(Debug)]
pub struct FileStore {
    config: FileStoreConfig,
    map: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl FileStore {
    /// Open a store in `data_dir`, loading the existing snapshot if present
    pub fn open(config: FileStoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.data_dir)?;

        let mut store = Self {
            config,
            map: BTreeMap::new(),
        };

        if store.store_path().exists() {
            store.load()?;
        }

        Ok(store)
    }

    /// Open with default configuration
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(FileStoreConfig::default())
    }

    /// Open a store rooted at `data_dir` with the default file name
    pub fn open_dir(data_dir: &Path) -> Result<Self, StoreError> {
        Self::open(FileStoreConfig {
            data_dir: data_dir.to_path_buf(),
            ..Default::default()
        })
    }

    /// Path of the snapshot file
    fn store_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.store_file)
    }

    /// Whether a snapshot exists on disk
    pub fn exists(&self) -> bool {
        self.store_path().exists()
    }

    /// Persist the current contents to disk
    pub fn save(&self) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            entries: self
                .map
                .iter()
                .map(|(k, v)| (hex::encode(k), hex::encode(v)))
                .collect(),
        };

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("store.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, &snapshot)?;

        // Atomic rename
        fs::rename(&temp_path, self.store_path())?;

        Ok(())
    }

    /// Reload contents from the snapshot on disk
    fn load(&mut self) -> Result<(), StoreError> {
        let file = fs::File::open(self.store_path())?;
        let reader = BufReader::new(file);

        let snapshot: Snapshot = serde_json::from_reader(reader)?;

        let mut map = BTreeMap::new();
        for (k, v) in snapshot.entries {
            let key = hex::decode(&k)
                .map_err(|_| StoreError::InvalidData(format!("bad hex key: {}", k)))?;
            let value = hex::decode(&v)
                .map_err(|_| StoreError::InvalidData(format!("bad hex value for key: {}", k)))?;
            map.insert(key, value);
        }

        self.map = map;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.map.insert(key.to_vec(), value);
    }

    fn has(&self, key: &[u8]) -> bool {
        self.map.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set_has() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get(b"key"), None);
        assert!(!store.has(b"key"));

        store.set(b"key", b"value".to_vec());
        assert_eq!(store.get(b"key"), Some(b"value".to_vec()));
        assert!(store.has(b"key"));
        assert_eq!(store.len(), 1);

        // Overwrite
        store.set(b"key", b"other".to_vec());
        assert_eq!(store.get(b"key"), Some(b"other".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_dump_is_hex_and_ordered() {
        let mut store = MemoryStore::new();
        store.set(b"b", vec![0xff]);
        store.set(b"a", vec![1, 2]);

        let dump = store.dump();
        assert_eq!(dump.len(), 2);
        // BTreeMap ordering: "a" (0x61) before "b" (0x62)
        assert_eq!(dump[0], ("61".to_string(), "0102".to_string()));
        assert_eq!(dump[1], ("62".to_string(), "ff".to_string()));
    }

    #[test]
    fn test_file_store_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut store = FileStore::open_dir(dir.path()).unwrap();
            store.set(b"alpha", vec![1, 2, 3]);
            store.set(b"beta", vec![0xff]);
            store.save().unwrap();
            assert!(store.exists());
        }

        let store = FileStore::open_dir(dir.path()).unwrap();
        assert_eq!(store.get(b"alpha"), Some(vec![1, 2, 3]));
        assert_eq!(store.get(b"beta"), Some(vec![0xff]));
        assert!(!store.has(b"gamma"));
    }

    #[test]
    fn test_file_store_unsaved_changes_not_persisted() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut store = FileStore::open_dir(dir.path()).unwrap();
            store.set(b"kept", vec![1]);
            store.save().unwrap();
            store.set(b"dropped", vec![2]);
            // no save
        }

        let store = FileStore::open_dir(dir.path()).unwrap();
        assert!(store.has(b"kept"));
        assert!(!store.has(b"dropped"));
    }

    #[test]
    fn test_file_store_empty_dir_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open_dir(dir.path()).unwrap();
        assert!(!store.exists());
        assert_eq!(store.get(b"anything"), None);
    }
}
