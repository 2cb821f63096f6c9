//! Key-value persistence for SplitMark
//!
//! Everything the application remembers between runs (the document
//! collection, the theme preference, window and layout settings) is stored
//! as a JSON record under a fixed key. The `KeyValueStore` trait is the port
//! those owners are handed; `FileStore` backs it with the platform data
//! directory and `MemoryStore` keeps records in memory.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use log::warn;
use serde::{de::DeserializeOwned, Serialize};

/// Key of the document collection record.
pub const DOCUMENTS_KEY: &str = "splitmark-documents";

/// Key of the theme preference record.
pub const THEME_KEY: &str = "theme";

/// Key of the window/layout settings record.
pub const SETTINGS_KEY: &str = "settings";

/// A string-keyed store of serialized records.
pub trait KeyValueStore {
    /// Read the raw record stored under `key`, or `None` if nothing is stored.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the record stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Load and deserialize the record under `key`.
///
/// Empty records are treated as missing.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.load(key)? {
        Some(raw) if !raw.trim().is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
        _ => Ok(None),
    }
}

/// Load the record under `key`, falling back to `default` when it is missing
/// or unreadable.
pub fn load_json_or<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            warn!("Stored record '{}' is unreadable: {}. Using default.", key, e);
            default
        }
    }
}

/// Serialize `value` and store it under `key`.
pub fn save_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    store.save(key, &json)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
