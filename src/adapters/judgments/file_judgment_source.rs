//! File-based Judgment Source Adapter
//!
//! Reads a hierarchy document from disk. The format follows the file
//! extension: `.yaml`/`.yml` is YAML, anything else JSON.

use async_trait::async_trait;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::hierarchy_document::{DocumentFormat, HierarchyDocument};
use crate::ports::{JudgmentSource, SourceError, SourcedHierarchy};

/// Judgment source backed by a single document file
#[derive(Debug, Clone)]
pub struct FileJudgmentSource {
    path: PathBuf,
}

impl FileJudgmentSource {
    /// Create a source for the document at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl JudgmentSource for FileJudgmentSource {
    async fn load(&self) -> Result<SourcedHierarchy, SourceError> {
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                IoErrorKind::NotFound => SourceError::NotFound(self.display_path()),
                _ => SourceError::Io {
                    path: self.display_path(),
                    reason: e.to_string(),
                },
            })?;

        let format = DocumentFormat::from_path(&self.path);
        let document = HierarchyDocument::parse(&text, format).map_err(|reason| {
            SourceError::Parse {
                path: self.display_path(),
                reason,
            }
        })?;

        tracing::debug!(path = %self.path.display(), ?format, "Loaded hierarchy document");
        document.into_sourced()
    }

    fn describe(&self) -> String {
        format!("file {}", self.display_path())
    }
}
