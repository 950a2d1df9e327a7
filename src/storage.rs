//! Small persistent key-value storage for client state that must survive restarts.

use crate::error::ClientError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&mut self, key: &str) -> Result<(), ClientError>;
}

/// Keeps every key in one JSON object on disk. The file is re-read on each access so
/// two clients sharing it see each other's writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, ClientError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                warn!("Ignoring unreadable storage file {}", self.path.display());
                Ok(Map::new())
            }
        }
    }

    fn write_all(&self, map: Map<String, Value>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, raw)?;
        debug!("Wrote storage file {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self
            .read_all()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_all(map)
    }

    fn remove(&mut self, key: &str) -> Result<(), ClientError> {
        let mut map = self.read_all()?;
        if map.remove(key).is_some() {
            self.write_all(map)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ClientError> {
        self.entries.remove(key);
        Ok(())
    }
}
