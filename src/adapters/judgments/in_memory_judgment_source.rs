//! In-Memory Judgment Source Adapter
//!
//! Returns a hierarchy that is already held in memory.
//! Useful for testing and for embedders that parse judgments themselves.

use async_trait::async_trait;

use crate::domain::ahp::{HierarchyInput, SettingsOverride};
use crate::ports::{JudgmentSource, SourceError, SourcedHierarchy};

/// Judgment source returning a fixed hierarchy
#[derive(Debug, Clone, Default)]
pub struct InMemoryJudgmentSource {
    hierarchy: SourcedHierarchy,
}

impl InMemoryJudgmentSource {
    /// Create a source for the given input
    pub fn new(input: HierarchyInput) -> Self {
        Self {
            hierarchy: input.into(),
        }
    }

    /// Attach per-evaluation settings
    pub fn with_settings(mut self, settings: SettingsOverride) -> Self {
        self.hierarchy.settings = settings;
        self
    }
}

#[async_trait]
impl JudgmentSource for InMemoryJudgmentSource {
    async fn load(&self) -> Result<SourcedHierarchy, SourceError> {
        Ok(self.hierarchy.clone())
    }

    fn describe(&self) -> String {
        format!(
            "in-memory hierarchy ({} criteria judgments, {} alternative judgments)",
            self.hierarchy.input.criteria.len(),
            self.hierarchy.input.alternatives.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_the_same_hierarchy_every_time() {
        let input = HierarchyInput::new()
            .criteria_judgment("Cost", "Speed", 2.0)
            .alternative_judgment("Cost", "A", "B", 3.0);
        let source = InMemoryJudgmentSource::new(input.clone()).with_settings(SettingsOverride {
            max_iterations: Some(10),
            ..Default::default()
        });

        let first = source.load().await.unwrap();
        let second = source.load().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.input, input);
        assert_eq!(first.settings.max_iterations, Some(10));
    }

    #[test]
    fn describe_counts_judgments() {
        let source = InMemoryJudgmentSource::new(
            HierarchyInput::new().criteria_judgment("Cost", "Speed", 2.0),
        );
        assert_eq!(
            source.describe(),
            "in-memory hierarchy (1 criteria judgments, 0 alternative judgments)"
        );
    }
}
