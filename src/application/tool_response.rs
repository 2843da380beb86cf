//! Tool Response - JSON envelope handed back to callers of the engine.
//!
//! Success: `{ success: true, weights, consistency, ranking, report }`.
//! Failure: `{ success: false, error: { kind, message, matrix?, stage? } }`.
//!
//! `weights`, `consistency` and `ranking` carry full precision. `report` is
//! the same data rounded for display.

use serde::Serialize;
use std::collections::BTreeMap;

use super::handlers::EvaluateHierarchyError;
use crate::domain::ahp::{AhpResult, ConsistencyRatios, EngineState, PriorityVector, RankedAlternative};
use crate::domain::foundation::MatrixId;

/// Decimal places used in reports unless configured otherwise.
pub const DEFAULT_REPORT_PRECISION: u32 = 3;

/// Rounded summary of an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub precision: u32,
    pub criteria_weights: PriorityVector,
    pub alternative_weights: BTreeMap<String, PriorityVector>,
    pub consistency: ConsistencyRatios,
    pub ranking: Vec<RankedAlternative>,
    pub summary: String,
}

impl Report {
    /// Rounds every weight, score and ratio of `result` to `precision` decimals.
    pub fn new(result: &AhpResult, precision: u32) -> Self {
        let round_vector = |v: &PriorityVector| {
            PriorityVector::from_pairs(v.iter().map(|(name, w)| (name, round_to(w, precision))))
        };

        let ranking: Vec<RankedAlternative> = result
            .ranking()
            .iter()
            .map(|r| RankedAlternative {
                score: round_to(r.score, precision),
                ..r.clone()
            })
            .collect();

        let summary = match ranking.first() {
            Some(best) => format!(
                "'{}' ranks first with a global score of {:.*} (max CR {:.*})",
                best.alternative,
                precision as usize,
                best.score,
                precision as usize,
                result.consistency_ratios().max()
            ),
            None => "No alternatives were ranked".to_string(),
        };

        Self {
            precision,
            criteria_weights: round_vector(result.criteria_weights()),
            alternative_weights: result
                .alternative_weights()
                .iter()
                .map(|(c, v)| (c.clone(), round_vector(v)))
                .collect(),
            consistency: ConsistencyRatios {
                criteria: round_to(result.consistency_ratios().criteria, precision),
                alternatives: result
                    .consistency_ratios()
                    .alternatives
                    .iter()
                    .map(|(c, r)| (c.clone(), round_to(*r, precision)))
                    .collect(),
            },
            ranking,
            summary,
        }
    }
}

/// Error body of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolError {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<MatrixId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<EngineState>,
}

impl From<&EvaluateHierarchyError> for ToolError {
    fn from(err: &EvaluateHierarchyError) -> Self {
        let (matrix, stage) = match err {
            EvaluateHierarchyError::Engine(failure) => {
                (failure.error.matrix().cloned(), Some(failure.stage))
            }
            EvaluateHierarchyError::Settings(e) => (e.matrix().cloned(), None),
            _ => (None, None),
        };
        Self {
            kind: err.code().to_string(),
            message: err.to_string(),
            matrix,
            stage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessBody {
    success: bool,
    pub weights: PriorityVector,
    pub consistency: ConsistencyRatios,
    pub ranking: Vec<RankedAlternative>,
    pub report: Report,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureBody {
    success: bool,
    pub error: ToolError,
}

/// Transport envelope for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Success(Box<SuccessBody>),
    Failure(FailureBody),
}

impl ToolResponse {
    /// Wraps a successful result. `weights` holds the global scores in rank order.
    pub fn success(result: &AhpResult, precision: u32) -> Self {
        let weights = PriorityVector::from_pairs(
            result
                .ranking()
                .iter()
                .map(|r| (r.alternative.clone(), r.score)),
        );
        Self::Success(Box::new(SuccessBody {
            success: true,
            weights,
            consistency: result.consistency_ratios().clone(),
            ranking: result.ranking().to_vec(),
            report: Report::new(result, precision),
        }))
    }

    /// Wraps a failure.
    pub fn failure(err: &EvaluateHierarchyError) -> Self {
        Self::Failure(FailureBody {
            success: false,
            error: err.into(),
        })
    }

    /// Builds the response for a handler outcome.
    pub fn from_outcome(outcome: &Result<AhpResult, EvaluateHierarchyError>, precision: u32) -> Self {
        match outcome {
            Ok(result) => Self::success(result, precision),
            Err(err) => Self::failure(err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Serializes to JSON text.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}
