//! AHP Result - immutable output of one engine evaluation.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{Consistency, PriorityVector, RankedAlternative};
use crate::domain::foundation::MatrixId;

/// Consistency ratios of every matrix in the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyRatios {
    pub criteria: f64,
    /// Keyed by criterion name.
    pub alternatives: BTreeMap<String, f64>,
}

impl ConsistencyRatios {
    /// Returns the largest ratio in the hierarchy.
    pub fn max(&self) -> f64 {
        self.alternatives
            .values()
            .copied()
            .fold(self.criteria, f64::max)
    }
}

/// Solver diagnostics for one matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixDiagnostics {
    pub matrix: MatrixId,
    pub order: usize,
    pub iterations: usize,
    #[serde(flatten)]
    pub consistency: Consistency,
}

/// Outcome of a successful evaluation.
///
/// Built once by the engine and never mutated; all access is read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AhpResult {
    criteria_weights: PriorityVector,
    alternative_weights: BTreeMap<String, PriorityVector>,
    consistency_ratios: ConsistencyRatios,
    ranking: Vec<RankedAlternative>,
    diagnostics: Vec<MatrixDiagnostics>,
}

impl AhpResult {
    pub(crate) fn new(
        criteria_weights: PriorityVector,
        alternative_weights: BTreeMap<String, PriorityVector>,
        consistency_ratios: ConsistencyRatios,
        ranking: Vec<RankedAlternative>,
        diagnostics: Vec<MatrixDiagnostics>,
    ) -> Self {
        Self {
            criteria_weights,
            alternative_weights,
            consistency_ratios,
            ranking,
            diagnostics,
        }
    }

    /// Criteria-level weights.
    pub fn criteria_weights(&self) -> &PriorityVector {
        &self.criteria_weights
    }

    /// Alternative weights keyed by criterion.
    pub fn alternative_weights(&self) -> &BTreeMap<String, PriorityVector> {
        &self.alternative_weights
    }

    /// Alternative weights under one criterion.
    pub fn alternative_weights_for(&self, criterion: &str) -> Option<&PriorityVector> {
        self.alternative_weights.get(criterion)
    }

    pub fn consistency_ratios(&self) -> &ConsistencyRatios {
        &self.consistency_ratios
    }

    /// Alternatives by descending global score.
    pub fn ranking(&self) -> &[RankedAlternative] {
        &self.ranking
    }

    /// The top-ranked alternative.
    pub fn best(&self) -> Option<&RankedAlternative> {
        self.ranking.first()
    }

    /// Global score of an alternative.
    pub fn score(&self, alternative: &str) -> Option<f64> {
        self.ranking
            .iter()
            .find(|r| r.alternative == alternative)
            .map(|r| r.score)
    }

    /// Sum of all global scores.
    pub fn total_score(&self) -> f64 {
        self.ranking.iter().map(|r| r.score).sum()
    }

    /// Per-matrix solver diagnostics, criteria first.
    pub fn diagnostics(&self) -> &[MatrixDiagnostics] {
        &self.diagnostics
    }
}
