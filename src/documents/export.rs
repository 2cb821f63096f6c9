//! Markdown export artifacts
//!
//! An export is the document's content written verbatim to a `.md` file
//! named after its title.

use crate::error::{Error, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Extension appended to exported file names.
pub const EXPORT_EXTENSION: &str = "md";

/// A document ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name, including the `.md` extension
    pub file_name: String,
    /// Exact document content
    pub content: String,
}

impl ExportArtifact {
    /// Build an artifact for a document title and its content.
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            file_name: format!("{}.{}", sanitize_file_name(title), EXPORT_EXTENSION),
            content: content.to_string(),
        }
    }
}

/// Replace every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize_file_name(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Write an artifact's content to `path`.
pub fn write_export(path: &Path, artifact: &ExportArtifact) -> Result<()> {
    fs::write(path, &artifact.content).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Exported {} bytes to {}", artifact.content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("My Doc! #1"), "My_Doc___1");
        assert_eq!(sanitize_file_name("plain123"), "plain123");
        assert_eq!(sanitize_file_name("café"), "caf_");
    }

    #[test]
    fn test_artifact_file_name() {
        let artifact = ExportArtifact::new("My Doc! #1", "# My Doc! #1");
        assert_eq!(artifact.file_name, "My_Doc___1.md");
        assert_eq!(artifact.content, "# My Doc! #1");
    }

    #[test]
    fn test_write_export_writes_content_verbatim() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("out.md");
        let artifact = ExportArtifact::new("Out", "line one\n\nline two\n");

        write_export(&path, &artifact).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "line one\n\nline two\n");
    }

    #[test]
    fn test_write_export_reports_path_on_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing_dir").join("out.md");
        let artifact = ExportArtifact::new("Out", "x");

        let err = write_export(&path, &artifact).unwrap_err();
        assert!(matches!(err, Error::FileWrite { path: p, .. } if p == path));
    }
}
