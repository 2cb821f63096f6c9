//! Centralized error handling for SplitMark
//!
//! This module provides a unified error type that covers the error scenarios
//! in the application: local persistence, file import/export, and rejected
//! document reorders.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the application.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the application.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // File I/O Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to write an exported document
    FileWrite { path: PathBuf, source: io::Error },

    /// Failed to read a file selected for import
    Import { path: PathBuf, source: io::Error },

    // ─────────────────────────────────────────────────────────────────────────
    // Storage Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to read a stored record
    StorageLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to write a stored record
    StorageSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A stored record could not be parsed
    StorageParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Data directory not found or inaccessible
    DataDirNotFound,

    // ─────────────────────────────────────────────────────────────────────────
    // Document Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// A reorder was not a permutation of the current documents
    ReorderMismatch { expected: usize, supplied: usize },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::StorageParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // File I/O Errors
            Error::FileWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            Error::Import { path, source } => {
                write!(f, "Failed to import '{}': {}", path.display(), source)
            }

            // Storage Errors
            Error::StorageLoad { path, source } => {
                write!(f, "Failed to load '{}': {}", path.display(), source)
            }
            Error::StorageSave { path, source } => {
                write!(f, "Failed to save '{}': {}", path.display(), source)
            }
            Error::StorageParse { message, .. } => {
                write!(f, "Invalid stored data: {}", message)
            }
            Error::DataDirNotFound => write!(f, "Data directory not found"),

            // Document Errors
            Error::ReorderMismatch { expected, supplied } => write!(
                f,
                "Reorder rejected: expected a permutation of {} documents, got {}",
                expected, supplied
            ),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FileWrite { source, .. } | Error::Import { source, .. } => Some(source),
            Error::StorageLoad { source, .. } | Error::StorageSave { source, .. } => {
                Some(source.as_ref())
            }
            Error::StorageParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::DataDirNotFound | Error::ReorderMismatch { .. } => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_display_names_path() {
        let err = Error::Import {
            path: PathBuf::from("/tmp/notes.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("notes.md"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_result: std::result::Result<String, _> = serde_json::from_str("invalid json");
        let err = Error::from(json_result.unwrap_err());
        assert!(matches!(err, Error::StorageParse { .. }));
    }

    #[test]
    fn test_reorder_mismatch_display() {
        let err = Error::ReorderMismatch {
            expected: 3,
            supplied: 2,
        };
        assert_eq!(
            err.to_string(),
            "Reorder rejected: expected a permutation of 3 documents, got 2"
        );
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as StdError;
        let err = Error::FileWrite {
            path: PathBuf::from("out.md"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert!(err.source().is_some());

        assert!(Error::DataDirNotFound.source().is_none());
        assert!(Error::ReorderMismatch {
            expected: 1,
            supplied: 0
        }
        .source()
        .is_none());
    }

    #[test]
    fn test_unwrap_or_warn_default_ok() {
        let result: Result<i32> = Ok(42);
        assert_eq!(result.unwrap_or_warn_default(0, "test context"), 42);
    }

    #[test]
    fn test_unwrap_or_warn_default_err() {
        let result: Result<i32> = Err(Error::DataDirNotFound);
        assert_eq!(result.unwrap_or_warn_default(0, "test context"), 0);
    }
}
