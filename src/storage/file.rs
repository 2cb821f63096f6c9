//! File-backed record store
//!
//! Each key is kept as `<key>.json` inside the application's data directory.
//! Writes go to a temporary sibling first and are then renamed over the
//! record so a crash mid-write never leaves a truncated file behind.

use super::KeyValueStore;
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name used under the platform data directory.
const APP_DIR_NAME: &str = "splitmark";

/// Extension of record files.
const RECORD_EXTENSION: &str = "json";

/// Extension of in-flight temporary files.
const TEMP_EXTENSION: &str = "json.tmp";

/// A `KeyValueStore` persisting each record as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the store in the platform data directory.
    ///
    /// - **Windows**: `%APPDATA%\splitmark\`
    /// - **macOS**: `~/Library/Application Support/splitmark/`
    /// - **Linux**: `~/.local/share/splitmark/`
    ///
    /// # Errors
    ///
    /// Returns `Error::DataDirNotFound` if the data directory cannot be determined.
    pub fn open_default() -> Result<Self> {
        dirs::data_dir()
            .map(|base| Self::new(base.join(APP_DIR_NAME)))
            .ok_or(Error::DataDirNotFound)
    }

    /// Directory holding the records.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, RECORD_EXTENSION))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            debug!("Creating data directory: {}", self.root.display());
            fs::create_dir_all(&self.root).map_err(|e| Error::StorageSave {
                path: self.root.clone(),
                source: Box::new(e),
            })?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key);
        if !path.exists() {
            debug!("No stored record at {}", path.display());
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|e| Error::StorageLoad {
            path: path.clone(),
            source: Box::new(e),
        })?;
        debug!("Loaded record '{}' from {}", key, path.display());
        Ok(Some(contents))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_root()?;
        let path = self.record_path(key);
        let temp_path = self.root.join(format!("{}.{}", key, TEMP_EXTENSION));

        fs::write(&temp_path, value).map_err(|e| Error::StorageSave {
            path: temp_path.clone(),
            source: Box::new(e),
        })?;
        fs::rename(&temp_path, &path).map_err(|e| Error::StorageSave {
            path: path.clone(),
            source: Box::new(e),
        })?;

        debug!("Saved record '{}' to {}", key, path.display());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
