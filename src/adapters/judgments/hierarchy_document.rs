//! Hierarchy Document - on-disk shape of a decision hierarchy.
//!
//! ```yaml
//! criteria:
//!   elements: [Cost, Quality]        # optional
//!   comparisons:
//!     - { elementA: Cost, elementB: Quality, value: 3 }
//! alternatives:
//!   - criterion: Cost
//!     elements: [A, B]               # optional
//!     comparisons:
//!       - { elementA: A, elementB: B, value: 2 }
//! settings:                          # optional
//!   consistencyThreshold: 0.1
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::domain::ahp::{AlternativeJudgment, HierarchyInput, Judgment, SettingsOverride};
use crate::ports::{SourceError, SourcedHierarchy};

/// Serialization format of a hierarchy document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension; anything but `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Criteria section of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<String>>,
    #[serde(default)]
    pub comparisons: Option<Vec<Judgment>>,
}

/// Alternative comparisons under one criterion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlternativeGroup {
    #[serde(default)]
    pub criterion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<String>>,
    #[serde(default)]
    pub comparisons: Option<Vec<Judgment>>,
}

/// A complete hierarchy document.
///
/// Every key is optional at the serde level so that a missing key is
/// reported as an invalid document rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyDocument {
    #[serde(default)]
    pub criteria: Option<CriteriaSection>,
    #[serde(default)]
    pub alternatives: Option<Vec<AlternativeGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsOverride>,
}

impl HierarchyDocument {
    /// Parses document text.
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self, String> {
        match format {
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        }
    }

    /// Converts the document into engine input.
    ///
    /// # Errors
    /// `SourceError::InvalidDocument` when:
    /// - `criteria` or `alternatives` is missing
    /// - `criteria.comparisons` is missing
    /// - a group lacks `criterion` or `comparisons`
    /// - groups declare different alternative element sets
    pub fn into_sourced(self) -> Result<SourcedHierarchy, SourceError> {
        let criteria = self
            .criteria
            .ok_or_else(|| invalid("missing 'criteria' section"))?;
        let groups = self
            .alternatives
            .ok_or_else(|| invalid("missing 'alternatives' section"))?;
        let criteria_comparisons = criteria
            .comparisons
            .ok_or_else(|| invalid("missing 'criteria.comparisons'"))?;

        let mut input = HierarchyInput {
            criteria_elements: criteria.elements,
            criteria: criteria_comparisons,
            ..Default::default()
        };

        for (index, group) in groups.into_iter().enumerate() {
            let criterion = group
                .criterion
                .ok_or_else(|| invalid(format!("alternatives[{}] is missing 'criterion'", index)))?;
            let comparisons = group.comparisons.ok_or_else(|| {
                invalid(format!(
                    "alternatives[{}] ('{}') is missing 'comparisons'",
                    index, criterion
                ))
            })?;

            if let Some(elements) = group.elements {
                match &input.alternative_elements {
                    None => input.alternative_elements = Some(elements),
                    Some(declared) if same_names(declared, &elements) => {}
                    Some(_) => {
                        return Err(invalid(format!(
                            "alternatives under '{}' declare a different element set",
                            criterion
                        )))
                    }
                }
            }

            input.alternatives.extend(comparisons.into_iter().map(|j| {
                AlternativeJudgment::new(criterion.clone(), j.element_a, j.element_b, j.value)
            }));
        }

        Ok(SourcedHierarchy {
            input,
            settings: self.settings.unwrap_or_default(),
        })
    }
}

fn same_names(a: &[String], b: &[String]) -> bool {
    a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
}

fn invalid(reason: impl Into<String>) -> SourceError {
    SourceError::InvalidDocument(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const YAML: &str = r#"
criteria:
  comparisons:
    - { elementA: Cost, elementB: Speed, value: 3 }
alternatives:
  - criterion: Cost
    comparisons:
      - { elementA: A, elementB: B, value: 2 }
  - criterion: Speed
    comparisons:
      - { elementA: B, elementB: A, value: 4 }
settings:
  consistencyThreshold: 0.2
"#;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            DocumentFormat::from_path(&PathBuf::from("h.yaml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(&PathBuf::from("h.YML")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(&PathBuf::from("h.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(&PathBuf::from("hierarchy")),
            DocumentFormat::Json
        );
    }

    #[test]
    fn yaml_document_flattens_into_input() {
        let doc = HierarchyDocument::parse(YAML, DocumentFormat::Yaml).unwrap();
        let sourced = doc.into_sourced().unwrap();

        assert_eq!(sourced.input.criteria.len(), 1);
        assert_eq!(sourced.input.alternatives.len(), 2);
        assert_eq!(sourced.input.alternatives[1].criterion, "Speed");
        assert_eq!(sourced.input.alternatives[1].element_a, "B");
        assert_eq!(sourced.settings.consistency_threshold, Some(0.2));
        assert_eq!(sourced.settings.max_iterations, None);
    }

    #[test]
    fn json_document_with_snake_case_keys() {
        let json = r#"{
            "criteria": {"elements": ["Only"], "comparisons": []},
            "alternatives": [{"criterion": "Only", "comparisons": [
                {"element_a": "A", "element_b": "B", "value": 0.5}
            ]}]
        }"#;
        let sourced = HierarchyDocument::parse(json, DocumentFormat::Json)
            .unwrap()
            .into_sourced()
            .unwrap();
        assert_eq!(sourced.input.criteria_elements, Some(vec!["Only".to_string()]));
        assert!(sourced.settings.is_empty());
    }

    #[test]
    fn missing_sections_are_invalid() {
        let err = HierarchyDocument::parse(r#"{"alternatives": []}"#, DocumentFormat::Json)
            .unwrap()
            .into_sourced()
            .unwrap_err();
        assert_eq!(
            err,
            SourceError::InvalidDocument("missing 'criteria' section".into())
        );

        let err = HierarchyDocument::parse(r#"{"criteria": {"comparisons": []}}"#, DocumentFormat::Json)
            .unwrap()
            .into_sourced()
            .unwrap_err();
        assert_eq!(
            err,
            SourceError::InvalidDocument("missing 'alternatives' section".into())
        );
    }

    #[test]
    fn group_without_criterion_is_invalid() {
        let json = r#"{
            "criteria": {"comparisons": []},
            "alternatives": [{"comparisons": []}]
        }"#;
        let err = HierarchyDocument::parse(json, DocumentFormat::Json)
            .unwrap()
            .into_sourced()
            .unwrap_err();
        assert!(err.is_document_error());
        assert!(err.to_string().contains("alternatives[0]"));
    }

    #[test]
    fn conflicting_alternative_lists_are_invalid() {
        let json = r#"{
            "criteria": {"comparisons": [{"elementA": "X", "elementB": "Y", "value": 1}]},
            "alternatives": [
                {"criterion": "X", "elements": ["A", "B"], "comparisons": []},
                {"criterion": "Y", "elements": ["A", "C"], "comparisons": []}
            ]
        }"#;
        let err = HierarchyDocument::parse(json, DocumentFormat::Json)
            .unwrap()
            .into_sourced()
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidDocument(_)));
    }

    #[test]
    fn reordered_alternative_lists_are_accepted() {
        let json = r#"{
            "criteria": {"comparisons": [{"elementA": "X", "elementB": "Y", "value": 1}]},
            "alternatives": [
                {"criterion": "X", "elements": ["A", "B"], "comparisons": []},
                {"criterion": "Y", "elements": ["B", "A"], "comparisons": []}
            ]
        }"#;
        let sourced = HierarchyDocument::parse(json, DocumentFormat::Json)
            .unwrap()
            .into_sourced()
            .unwrap();
        assert_eq!(
            sourced.input.alternative_elements,
            Some(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn malformed_text_fails_to_parse() {
        assert!(HierarchyDocument::parse("{not json", DocumentFormat::Json).is_err());
        assert!(HierarchyDocument::parse("criteria: [", DocumentFormat::Yaml).is_err());
    }
}
