//! Settings and theme persistence for SplitMark
//!
//! Both records go through the application's `KeyValueStore`. Loading never
//! fails: a missing record yields defaults and a corrupt one is logged and
//! replaced by defaults.

use crate::config::{Settings, Theme};
use crate::error::{Error, Result, ResultExt};
use crate::storage::{load_json_or, save_json, KeyValueStore, SETTINGS_KEY, THEME_KEY};
use log::{debug, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Load window and layout settings, falling back to defaults.
pub fn load_settings(store: &dyn KeyValueStore) -> Settings {
    load_settings_internal(store)
        .unwrap_or_warn_default(Settings::default(), "Failed to load settings")
}

fn load_settings_internal(store: &dyn KeyValueStore) -> Result<Settings> {
    let Some(raw) = store.load(SETTINGS_KEY)? else {
        debug!("No stored settings, using defaults");
        return Ok(Settings::default());
    };
    if raw.trim().is_empty() {
        return Ok(Settings::default());
    }

    Settings::from_json_sanitized(&raw).map_err(|e| Error::StorageParse {
        message: format!("Failed to parse settings: {}", e),
        source: Some(Box::new(e)),
    })
}

/// Save window and layout settings.
pub fn save_settings(store: &mut dyn KeyValueStore, settings: &Settings) -> Result<()> {
    save_json(store, SETTINGS_KEY, settings)
}

/// Save settings, logging instead of returning errors.
///
/// Returns `true` if the save succeeded.
pub fn save_settings_silent(store: &mut dyn KeyValueStore, settings: &Settings) -> bool {
    match save_settings(store, settings) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save settings: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme
// ─────────────────────────────────────────────────────────────────────────────

/// Load the theme preference, defaulting to `Theme::System`.
pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    load_json_or(store, THEME_KEY, Theme::default())
}

/// Save the theme preference, logging failures.
pub fn save_theme(store: &mut dyn KeyValueStore, theme: Theme) {
    if let Err(e) = save_json(store, THEME_KEY, &theme) {
        warn!("Failed to save theme preference: {}", e);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_missing_settings_use_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_settings(&store), Settings::default());
    }

    #[test]
    fn test_corrupt_settings_use_defaults() {
        let mut store = MemoryStore::new();
        store.save(SETTINGS_KEY, "{ invalid json }").unwrap();
        assert_eq!(load_settings(&store), Settings::default());
    }

    #[test]
    fn test_loaded_settings_are_sanitized() {
        let mut store = MemoryStore::new();
        store.save(SETTINGS_KEY, r#"{"split_position": 5.0}"#).unwrap();
        assert_eq!(load_settings(&store).split_position, Settings::MIN_SPLIT_POSITION);
    }

    #[test]
    fn test_settings_roundtrip_on_disk() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = FileStore::new(temp_dir.path());
        let settings = Settings {
            preview_visible: false,
            split_position: 35.0,
            ..Settings::default()
        };

        assert!(save_settings_silent(&mut store, &settings));
        assert_eq!(load_settings(&store), settings);
    }

    #[test]
    fn test_theme_defaults_to_system() {
        let store = MemoryStore::new();
        assert_eq!(load_theme(&store), Theme::System);
    }

    #[test]
    fn test_theme_is_stored_as_json_string() {
        let mut store = MemoryStore::new();
        save_theme(&mut store, Theme::Dark);
        assert_eq!(store.load(THEME_KEY).unwrap().as_deref(), Some("\"dark\""));
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let mut store = MemoryStore::new();
        store.save(THEME_KEY, "\"sepia\"").unwrap();
        assert_eq!(load_theme(&store), Theme::System);
    }
}
