// Session storage backends.
//
// The identity store talks to a pluggable key/value backend so that the same
// record logic serves the file-backed session folder in the app and an
// in-memory map in tests (and as the degraded mode when no folder can be
// resolved).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read session key '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write session key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove session key '{key}': {source}")]
    Remove {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("session key '{key}' holds malformed data: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Session-scoped key/value persistence. Values are serialized JSON blobs;
/// the backend stores them opaquely.
pub trait SessionBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One JSON file per key under a session folder.
#[derive(Debug)]
pub struct FileSessionBackend {
    dir: PathBuf,
}

impl FileSessionBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Backend rooted at the default session folder (env override,
    /// then platform data dir, then temp).
    pub fn open_default() -> anyhow::Result<Self> {
        let dir = crate::utils::path_resolver::resolve_session_folder()?;
        Ok(Self::new(dir))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SessionBackend for FileSessionBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::Write {
            key: key.to_string(),
            source: e,
        })?;
        std::fs::write(self.path_for(key), value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            source: e,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Remove {
                key: key.to_string(),
                source: e,
            }),
        }
    }
}

/// In-memory backend for tests and storage-unavailable degradation.
#[derive(Debug, Default)]
pub struct MemorySessionBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing serialization. Used to simulate what an
    /// earlier session (or another writer) left under the key.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("session backend lock poisoned")
            .insert(key.to_string(), value.to_string());
    }
}

impl SessionBackend for MemorySessionBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .expect("session backend lock poisoned")
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .expect("session backend lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .expect("session backend lock poisoned")
            .remove(key);
        Ok(())
    }
}
