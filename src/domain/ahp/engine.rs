//! AHP Engine - facade driving validation, solving, the consistency gate and composition.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::input::PreparedHierarchy;
use super::result::{ConsistencyRatios, MatrixDiagnostics};
use super::{
    AhpResult, ComparisonMatrix, EngineSettings, HierarchyComposer, HierarchyInput,
    PrioritySolver, Solution,
};
use crate::domain::foundation::{
    AhpError, ConsistencyViolation, ErrorKind, MatrixId, StateMachine,
};

/// Stages of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    Validating,
    SolvingCriteria,
    SolvingAlternatives,
    ConsistencyGate,
    Composing,
    Done,
    Failed,
}

impl StateMachine for EngineState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EngineState::*;
        matches!(
            (self, target),
            (Idle, Validating)
                | (Validating, SolvingCriteria)
                | (SolvingCriteria, SolvingAlternatives)
                | (SolvingAlternatives, ConsistencyGate)
                | (ConsistencyGate, Composing)
                | (Composing, Done)
                | (Idle, Failed)
                | (Validating, Failed)
                | (SolvingCriteria, Failed)
                | (SolvingAlternatives, Failed)
                | (ConsistencyGate, Failed)
                | (Composing, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EngineState::*;
        match self {
            Idle => vec![Validating, Failed],
            Validating => vec![SolvingCriteria, Failed],
            SolvingCriteria => vec![SolvingAlternatives, Failed],
            SolvingAlternatives => vec![ConsistencyGate, Failed],
            ConsistencyGate => vec![Composing, Failed],
            Composing => vec![Done, Failed],
            Done | Failed => vec![],
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EngineState::Idle => "idle",
            EngineState::Validating => "validating",
            EngineState::SolvingCriteria => "solving criteria",
            EngineState::SolvingAlternatives => "solving alternatives",
            EngineState::ConsistencyGate => "consistency gate",
            EngineState::Composing => "composing",
            EngineState::Done => "done",
            EngineState::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Terminal failure of an evaluation: the stage it stopped in and why.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("AHP evaluation failed during {stage}: {error}")]
pub struct EngineFailure {
    pub stage: EngineState,
    #[source]
    pub error: AhpError,
}

impl EngineFailure {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Tracks the stage of a single evaluation.
struct Lifecycle {
    state: EngineState,
}

impl Lifecycle {
    fn new() -> Self {
        Self {
            state: EngineState::Idle,
        }
    }

    fn advance(&mut self, next: EngineState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "invalid engine transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::debug!(from = %self.state, to = %next, "AHP engine stage change");
        self.state = next;
    }

    fn fail(&mut self, error: AhpError) -> EngineFailure {
        let stage = self.state;
        self.advance(EngineState::Failed);
        match error.kind() {
            ErrorKind::Consistency => {
                tracing::warn!(%stage, %error, "AHP consistency gate rejected judgments")
            }
            kind => tracing::debug!(%stage, %kind, %error, "AHP evaluation failed"),
        }
        EngineFailure { stage, error }
    }
}

/// Multi-criteria decision engine.
///
/// Holds only immutable settings, so a single engine may serve concurrent
/// evaluations. Evaluation is all-or-nothing: any failure discards every
/// partial result.
#[derive(Debug, Clone)]
pub struct AhpEngine {
    settings: EngineSettings,
    solver: PrioritySolver,
}

impl AhpEngine {
    /// Creates an engine after validating its settings.
    pub fn new(settings: EngineSettings) -> Result<Self, AhpError> {
        settings.validate()?;
        Ok(Self {
            solver: PrioritySolver::from_settings(&settings),
            settings,
        })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Evaluates a hierarchy into a global ranking.
    ///
    /// Runs Validating → SolvingCriteria → SolvingAlternatives →
    /// ConsistencyGate → Composing → Done. The returned failure names the
    /// stage that failed.
    pub fn evaluate(&self, input: &HierarchyInput) -> Result<AhpResult, EngineFailure> {
        let mut lifecycle = Lifecycle::new();

        lifecycle.advance(EngineState::Validating);
        let PreparedHierarchy {
            criteria,
            alternatives,
        } = input.prepare().map_err(|e| lifecycle.fail(e))?;

        lifecycle.advance(EngineState::SolvingCriteria);
        let criteria_solution = self
            .solver
            .solve(&criteria)
            .map_err(|e| lifecycle.fail(e))?;

        lifecycle.advance(EngineState::SolvingAlternatives);
        let alternative_solutions = self
            .solve_alternatives(&alternatives)
            .map_err(|e| lifecycle.fail(e))?;

        lifecycle.advance(EngineState::ConsistencyGate);
        let ratios = self
            .consistency_gate(&criteria_solution, &alternatives, &alternative_solutions)
            .map_err(|e| lifecycle.fail(e))?;

        lifecycle.advance(EngineState::Composing);
        let mut diagnostics = vec![diagnostics_for(&criteria, &criteria_solution)];
        let mut alternative_weights = BTreeMap::new();
        for (matrix, solution) in alternatives.iter().zip(alternative_solutions) {
            diagnostics.push(diagnostics_for(matrix, &solution));
            if let Some(criterion) = matrix.id().criterion() {
                alternative_weights.insert(criterion.to_string(), solution.priorities);
            }
        }
        let ranking = HierarchyComposer::compose(&criteria_solution.priorities, &alternative_weights)
            .map_err(|e| lifecycle.fail(e))?;

        lifecycle.advance(EngineState::Done);
        tracing::info!(
            criteria = criteria.order(),
            alternatives = ranking.len(),
            best = ranking.first().map(|r| r.alternative.as_str()).unwrap_or_default(),
            max_cr = ratios.max(),
            "AHP evaluation complete"
        );

        Ok(AhpResult::new(
            criteria_solution.priorities,
            alternative_weights,
            ratios,
            ranking,
            diagnostics,
        ))
    }

    /// Solves every alternative matrix; the first failure in criteria order wins.
    fn solve_alternatives(&self, matrices: &[ComparisonMatrix]) -> Result<Vec<Solution>, AhpError> {
        let outcomes: Vec<Result<Solution, AhpError>> = if self.settings.parallel {
            matrices.par_iter().map(|m| self.solver.solve(m)).collect()
        } else {
            matrices.iter().map(|m| self.solver.solve(m)).collect()
        };
        outcomes.into_iter().collect()
    }

    /// Rejects the run if any matrix exceeds the consistency threshold.
    fn consistency_gate(
        &self,
        criteria: &Solution,
        matrices: &[ComparisonMatrix],
        solutions: &[Solution],
    ) -> Result<ConsistencyRatios, AhpError> {
        let threshold = self.settings.consistency_threshold;
        let mut violations = Vec::new();

        if criteria.consistency_ratio() > threshold {
            violations.push(ConsistencyViolation {
                matrix: MatrixId::Criteria,
                ratio: criteria.consistency_ratio(),
            });
        }

        let mut alternatives = BTreeMap::new();
        for (matrix, solution) in matrices.iter().zip(solutions) {
            let ratio = solution.consistency_ratio();
            if ratio > threshold {
                violations.push(ConsistencyViolation {
                    matrix: matrix.id().clone(),
                    ratio,
                });
            }
            if let Some(criterion) = matrix.id().criterion() {
                alternatives.insert(criterion.to_string(), ratio);
            }
        }

        if !violations.is_empty() {
            return Err(AhpError::Inconsistent {
                threshold,
                violations,
            });
        }

        Ok(ConsistencyRatios {
            criteria: criteria.consistency_ratio(),
            alternatives,
        })
    }
}

impl Default for AhpEngine {
    fn default() -> Self {
        let settings = EngineSettings::default();
        Self {
            solver: PrioritySolver::from_settings(&settings),
            settings,
        }
    }
}

fn diagnostics_for(matrix: &ComparisonMatrix, solution: &Solution) -> MatrixDiagnostics {
    MatrixDiagnostics {
        matrix: matrix.id().clone(),
        order: matrix.order(),
        iterations: solution.iterations,
        consistency: solution.consistency,
    }
}
