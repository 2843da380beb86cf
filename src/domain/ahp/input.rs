//! Hierarchy input - the structured judgment sets the engine consumes.

use serde::{Deserialize, Serialize};

use super::judgment::{elements_in_first_seen_order, validate_name};
use super::{AlternativeJudgment, ComparisonMatrix, Judgment};
use crate::domain::foundation::{AhpError, MatrixId};

/// Criteria judgments plus per-criterion alternative judgments.
///
/// Element order is taken from the optional explicit lists, or else from
/// the order in which names first appear in the judgments. An explicit list
/// is the only way to describe a one-element set, which has no pairs to judge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyInput {
    #[serde(default, alias = "criteriaElements", skip_serializing_if = "Option::is_none")]
    pub criteria_elements: Option<Vec<String>>,

    #[serde(default)]
    pub criteria: Vec<Judgment>,

    #[serde(default, alias = "alternativeElements", skip_serializing_if = "Option::is_none")]
    pub alternative_elements: Option<Vec<String>>,

    #[serde(default)]
    pub alternatives: Vec<AlternativeJudgment>,
}

impl HierarchyInput {
    /// Creates an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the criteria order.
    pub fn with_criteria_elements(mut self, elements: Vec<impl Into<String>>) -> Self {
        self.criteria_elements = Some(elements.into_iter().map(Into::into).collect());
        self
    }

    /// Fixes the alternative order used for every criterion.
    pub fn with_alternative_elements(mut self, elements: Vec<impl Into<String>>) -> Self {
        self.alternative_elements = Some(elements.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a criteria judgment.
    pub fn criteria_judgment(
        mut self,
        element_a: impl Into<String>,
        element_b: impl Into<String>,
        value: f64,
    ) -> Self {
        self.criteria.push(Judgment::new(element_a, element_b, value));
        self
    }

    /// Adds an alternative judgment under a criterion.
    pub fn alternative_judgment(
        mut self,
        criterion: impl Into<String>,
        element_a: impl Into<String>,
        element_b: impl Into<String>,
        value: f64,
    ) -> Self {
        self.alternatives
            .push(AlternativeJudgment::new(criterion, element_a, element_b, value));
        self
    }

    /// Checks the overall shape of the input and builds every comparison matrix.
    ///
    /// # Errors
    /// All errors are config errors:
    /// - No criteria at all
    /// - Malformed criterion names, or alternatives under an unknown criterion
    /// - A criterion without any alternative judgments (unless a single
    ///   alternative was declared explicitly)
    /// - Any matrix construction failure
    pub(crate) fn prepare(&self) -> Result<PreparedHierarchy, AhpError> {
        let criteria_elements = match &self.criteria_elements {
            Some(explicit) => explicit.clone(),
            None => elements_in_first_seen_order(&self.criteria),
        };
        if criteria_elements.is_empty() {
            return Err(AhpError::MissingCriteria);
        }

        for judgment in &self.alternatives {
            validate_name(&judgment.criterion)?;
            if !criteria_elements.contains(&judgment.criterion) {
                return Err(AhpError::UnknownCriterion {
                    criterion: judgment.criterion.clone(),
                });
            }
        }

        let criteria =
            ComparisonMatrix::build(MatrixId::Criteria, &criteria_elements, &self.criteria)?;

        let single_alternative = self
            .alternative_elements
            .as_ref()
            .is_some_and(|elements| elements.len() == 1);

        let mut alternatives = Vec::with_capacity(criteria_elements.len());
        for criterion in &criteria_elements {
            let judgments: Vec<Judgment> = self
                .alternatives
                .iter()
                .filter(|j| &j.criterion == criterion)
                .map(AlternativeJudgment::to_judgment)
                .collect();

            if judgments.is_empty() && !single_alternative {
                return Err(AhpError::MissingAlternatives {
                    criterion: criterion.clone(),
                });
            }

            let elements = match &self.alternative_elements {
                Some(explicit) => explicit.clone(),
                None => elements_in_first_seen_order(&judgments),
            };

            alternatives.push(ComparisonMatrix::build(
                MatrixId::alternatives(criterion.clone()),
                &elements,
                &judgments,
            )?);
        }

        Ok(PreparedHierarchy {
            criteria,
            alternatives,
        })
    }
}

/// Every matrix of a validated hierarchy, alternatives in criteria order.
#[derive(Debug, Clone)]
pub(crate) struct PreparedHierarchy {
    pub criteria: ComparisonMatrix,
    pub alternatives: Vec<ComparisonMatrix>,
}
