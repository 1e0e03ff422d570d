//! # Document Persistence
//!
//! Documents persist as JSON text under a [`StoreKey`]. Backends only move
//! text around; [`JsonStore`] owns the decode policy:
//!
//! - non-empty block array → sanitized blocks
//! - empty array → none, entry left in place
//! - invalid JSON or a non-array → none, entry cleared
//!
//! Failures never propagate to callers: the public operations return
//! `bool`/`Option` and log what went wrong.

use crate::errors::StoreError;
use folio_document::{sanitize, Block};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_STORE_KEY: &str = "folio-document";

/// Name a document is stored under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey(String);

impl StoreKey {
    pub fn new(key: impl Into<String>) -> Self {
        StoreKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StoreKey {
    fn default() -> Self {
        StoreKey::new(DEFAULT_STORE_KEY)
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait DocumentStore {
    fn save(&mut self, key: &StoreKey, blocks: &[Block]) -> bool;
    fn load(&mut self, key: &StoreKey) -> Option<Vec<Block>>;
    fn clear(&mut self, key: &StoreKey) -> bool;
    fn exists(&self, key: &StoreKey) -> bool;
}

/// Raw text storage behind a [`JsonStore`]
pub trait StoreBackend {
    fn read(&self, key: &StoreKey) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &StoreKey, text: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &StoreKey) -> Result<(), StoreError>;
    fn contains(&self, key: &StoreKey) -> bool;
}

/// Decode stored text into blocks
pub fn decode_stored(text: &str) -> Result<Vec<Block>, StoreError> {
    let raw: Value = serde_json::from_str(text).map_err(StoreError::Malformed)?;
    match &raw {
        Value::Array(items) if items.is_empty() => Err(StoreError::Empty),
        Value::Array(_) => Ok(sanitize(&raw)),
        _ => Err(StoreError::NotASequence),
    }
}

#[derive(Debug, Default)]
pub struct JsonStore<B> {
    backend: B,
}

pub type MemoryStore = JsonStore<MemoryBackend>;
pub type FileStore = JsonStore<FileBackend>;

impl<B: StoreBackend> JsonStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn try_save(&mut self, key: &StoreKey, blocks: &[Block]) -> Result<(), StoreError> {
        let text = serde_json::to_string(blocks).map_err(StoreError::Encode)?;
        self.backend.write(key, &text)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_backend(MemoryBackend::default())
    }
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::with_backend(FileBackend::new(dir))
    }
}

impl<B: StoreBackend> DocumentStore for JsonStore<B> {
    fn save(&mut self, key: &StoreKey, blocks: &[Block]) -> bool {
        match self.try_save(key, blocks) {
            Ok(()) => {
                debug!(key = %key, blocks = blocks.len(), "Saved document");
                true
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Failed to save document");
                false
            }
        }
    }

    fn load(&mut self, key: &StoreKey) -> Option<Vec<Block>> {
        let text = match self.backend.read(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %key, error = %err, "Failed to read stored document");
                return None;
            }
        };

        match decode_stored(&text) {
            Ok(blocks) => Some(blocks),
            Err(StoreError::Empty) => None,
            Err(err) => {
                warn!(key = %key, error = %err, "Discarding unreadable stored document");
                self.clear(key);
                None
            }
        }
    }

    fn clear(&mut self, key: &StoreKey) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %key, error = %err, "Failed to clear stored document");
                false
            }
        }
    }

    fn exists(&self, key: &StoreKey) -> bool {
        self.backend.contains(key)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<StoreKey, String>,
}

impl StoreBackend for MemoryBackend {
    fn read(&self, key: &StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &StoreKey, text: &str) -> Result<(), StoreError> {
        self.entries.insert(key.clone(), text.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &StoreKey) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn contains(&self, key: &StoreKey) -> bool {
        self.entries.contains_key(key)
    }
}

/// One `<key>.json` file per document under a directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &StoreKey) -> PathBuf {
        let name: String = key
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl StoreBackend for FileBackend {
    fn read(&self, key: &StoreKey) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&mut self, key: &StoreKey, text: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, text)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &StoreKey) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn contains(&self, key: &StoreKey) -> bool {
        self.path_for(key).exists()
    }
}
