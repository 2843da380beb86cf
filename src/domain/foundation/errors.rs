//! Error types for the decision engine.
//!
//! Every failure the engine can produce is an [`AhpError`]. Each variant maps to
//! exactly one [`ErrorKind`], which is what callers branch on; the variant itself
//! carries the detail needed to correct the input.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identity of a comparison matrix inside a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum MatrixId {
    /// The criteria-level matrix.
    Criteria,
    /// The alternatives matrix judged under one criterion.
    Alternatives { criterion: String },
}

impl MatrixId {
    /// Creates the identity of an alternatives matrix.
    pub fn alternatives(criterion: impl Into<String>) -> Self {
        MatrixId::Alternatives {
            criterion: criterion.into(),
        }
    }

    /// Returns the criterion name for alternative matrices.
    pub fn criterion(&self) -> Option<&str> {
        match self {
            MatrixId::Criteria => None,
            MatrixId::Alternatives { criterion } => Some(criterion),
        }
    }
}

impl fmt::Display for MatrixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixId::Criteria => write!(f, "criteria"),
            MatrixId::Alternatives { criterion } => {
                write!(f, "alternatives under '{}'", criterion)
            }
        }
    }
}

/// Error categories exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed input: missing keys, unknown names, bad values, incomplete sets.
    #[serde(rename = "AHP_CONFIG_ERROR")]
    Config,
    /// Hierarchy shape mismatch found while composing.
    #[serde(rename = "AHP_STRUCTURE_ERROR")]
    Structure,
    /// Solver failure: no convergence or degenerate weights.
    #[serde(rename = "AHP_NUMERICAL_ERROR")]
    Numerical,
    /// A consistency ratio exceeded the configured threshold.
    #[serde(rename = "AHP_CONSISTENCY_ERROR")]
    Consistency,
}

impl ErrorKind {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Config => "AHP_CONFIG_ERROR",
            ErrorKind::Structure => "AHP_STRUCTURE_ERROR",
            ErrorKind::Numerical => "AHP_NUMERICAL_ERROR",
            ErrorKind::Consistency => "AHP_CONSISTENCY_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A matrix whose consistency ratio failed the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyViolation {
    pub matrix: MatrixId,
    pub ratio: f64,
}

fn describe_violations(violations: &[ConsistencyViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} (CR {:.4})", v.matrix, v.ratio))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors produced while building, solving, or composing a hierarchy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    // Config errors
    #[error("Engine settings are invalid: {reason}")]
    InvalidSettings { reason: String },

    #[error("Criteria judgment set is missing or empty")]
    MissingCriteria,

    #[error("No alternative judgments supplied for criterion '{criterion}'")]
    MissingAlternatives { criterion: String },

    #[error("Alternative judgments reference unknown criterion '{criterion}'")]
    UnknownCriterion { criterion: String },

    #[error("Element name '{name}' is not well-formed")]
    MalformedName { name: String },

    #[error("Matrix {matrix} has no elements")]
    EmptyElementSet { matrix: MatrixId },

    #[error("Element '{element}' appears more than once in {matrix}")]
    DuplicateElement { matrix: MatrixId, element: String },

    #[error("Judgment in {matrix} references unknown element '{element}'")]
    UnknownElement { matrix: MatrixId, element: String },

    #[error("Judgment in {matrix} compares '{element}' with itself")]
    SelfComparison { matrix: MatrixId, element: String },

    #[error("Judgment {element_a} vs {element_b} in {matrix} has value {value}, outside [1/9, 9]")]
    ValueOutOfRange {
        matrix: MatrixId,
        element_a: String,
        element_b: String,
        value: f64,
    },

    #[error("Conflicting judgments for {element_a} vs {element_b} in {matrix}: {first} and {second}")]
    ConflictingJudgment {
        matrix: MatrixId,
        element_a: String,
        element_b: String,
        first: f64,
        second: f64,
    },

    #[error("Matrix {matrix} is incomplete: {element_a} vs {element_b} was never compared")]
    IncompleteComparisons {
        matrix: MatrixId,
        element_a: String,
        element_b: String,
    },

    #[error("Matrix {matrix} has order {order}, larger than the supported maximum {max}")]
    OrderTooLarge {
        matrix: MatrixId,
        order: usize,
        max: usize,
    },

    // Structure errors
    #[error("Criterion '{criterion}' has no alternative weights to compose")]
    MissingAlternativeWeights { criterion: String },

    #[error("Alternatives under '{criterion}' are {found:?}, expected {expected:?}")]
    AlternativeSetMismatch {
        criterion: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    // Numerical errors
    #[error("Power iteration on {matrix} did not converge after {iterations} iterations (last change {delta:e})")]
    NotConverged {
        matrix: MatrixId,
        iterations: usize,
        delta: f64,
    },

    #[error("Power iteration on {matrix} produced a non-finite vector")]
    NonFiniteVector { matrix: MatrixId },

    #[error("Element '{element}' in {matrix} received a zero weight")]
    DegenerateWeight { matrix: MatrixId, element: String },

    // Consistency errors
    #[error("Consistency ratio above {threshold}: {}", describe_violations(.violations))]
    Inconsistent {
        threshold: f64,
        violations: Vec<ConsistencyViolation>,
    },
}

impl AhpError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AhpError::InvalidSettings { .. }
            | AhpError::MissingCriteria
            | AhpError::MissingAlternatives { .. }
            | AhpError::UnknownCriterion { .. }
            | AhpError::MalformedName { .. }
            | AhpError::EmptyElementSet { .. }
            | AhpError::DuplicateElement { .. }
            | AhpError::UnknownElement { .. }
            | AhpError::SelfComparison { .. }
            | AhpError::ValueOutOfRange { .. }
            | AhpError::ConflictingJudgment { .. }
            | AhpError::IncompleteComparisons { .. }
            | AhpError::OrderTooLarge { .. } => ErrorKind::Config,
            AhpError::MissingAlternativeWeights { .. }
            | AhpError::AlternativeSetMismatch { .. } => ErrorKind::Structure,
            AhpError::NotConverged { .. }
            | AhpError::NonFiniteVector { .. }
            | AhpError::DegenerateWeight { .. } => ErrorKind::Numerical,
            AhpError::Inconsistent { .. } => ErrorKind::Consistency,
        }
    }

    /// Returns the matrix this error is about, if it concerns a single matrix.
    ///
    /// For consistency failures this is the first offending matrix.
    pub fn matrix(&self) -> Option<&MatrixId> {
        match self {
            AhpError::EmptyElementSet { matrix }
            | AhpError::DuplicateElement { matrix, .. }
            | AhpError::UnknownElement { matrix, .. }
            | AhpError::SelfComparison { matrix, .. }
            | AhpError::ValueOutOfRange { matrix, .. }
            | AhpError::ConflictingJudgment { matrix, .. }
            | AhpError::IncompleteComparisons { matrix, .. }
            | AhpError::OrderTooLarge { matrix, .. }
            | AhpError::NotConverged { matrix, .. }
            | AhpError::NonFiniteVector { matrix }
            | AhpError::DegenerateWeight { matrix, .. } => Some(matrix),
            AhpError::Inconsistent { violations, .. } => violations.first().map(|v| &v.matrix),
            _ => None,
        }
    }
}

/// Errors that occur during value validation outside the engine proper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
