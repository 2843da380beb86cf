//! Judgment Source Port - Interface for obtaining hierarchy judgments.
//!
//! Whoever produces the pairwise judgments (a person editing a file, a model,
//! a test fixture) sits behind this port. The engine only sees the result.

use async_trait::async_trait;

use crate::domain::ahp::{HierarchyInput, SettingsOverride};

/// Errors that can occur while obtaining judgments
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("Hierarchy document not found: {0}")]
    NotFound(String),

    #[error("IO error reading {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse hierarchy document {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid hierarchy document: {0}")]
    InvalidDocument(String),
}

impl SourceError {
    /// Returns true when the document itself is at fault rather than its transport.
    pub fn is_document_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::InvalidDocument(_))
    }
}

/// Judgments plus any per-document settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcedHierarchy {
    pub input: HierarchyInput,
    pub settings: SettingsOverride,
}

impl From<HierarchyInput> for SourcedHierarchy {
    fn from(input: HierarchyInput) -> Self {
        Self {
            input,
            settings: SettingsOverride::default(),
        }
    }
}

/// Port for loading a hierarchy to evaluate
#[async_trait]
pub trait JudgmentSource: Send + Sync {
    /// Load the judgments
    ///
    /// # Errors
    /// Returns `SourceError` if the judgments cannot be read or are not
    /// shaped like a hierarchy. Value-level validation is left to the engine.
    async fn load(&self) -> Result<SourcedHierarchy, SourceError>;

    /// Short human-readable description used in logs
    fn describe(&self) -> String;
}
