//! AHP Module - Analytic Hierarchy Process decision engine.
//!
//! Turns pairwise judgments on Saaty's 1/9..9 scale into criteria weights,
//! per-criterion alternative weights, consistency ratios and a global ranking.
//!
//! # Components
//!
//! - `ComparisonMatrix` - Reciprocal matrix built from validated judgments
//! - `PrioritySolver` - Power-iteration eigenvector, λmax, CI and CR
//! - `HierarchyComposer` - Weighted synthesis into a ranked list
//! - `AhpEngine` - Facade running the full evaluation lifecycle
//!
//! # Design Philosophy
//!
//! Everything here is pure and synchronous. Results depend only on the input
//! and the engine settings, never on thread scheduling.

mod comparison_matrix;
mod engine;
mod hierarchy_composer;
mod input;
mod judgment;
mod priority_solver;
mod priority_vector;
mod random_index;
mod result;
mod settings;

// Re-export all public types
pub use comparison_matrix::ComparisonMatrix;
pub use engine::{AhpEngine, EngineFailure, EngineState};
pub use hierarchy_composer::{HierarchyComposer, RankedAlternative};
pub use input::HierarchyInput;
pub use judgment::{AlternativeJudgment, Judgment, JUDGMENT_TOLERANCE, SCALE_MAX, SCALE_MIN};
pub use priority_solver::{Consistency, PrioritySolver, Solution};
pub use priority_vector::{PriorityVector, WEIGHT_SUM_TOLERANCE};
pub use random_index::{random_index, MAX_MATRIX_ORDER};
pub use result::{AhpResult, ConsistencyRatios, MatrixDiagnostics};
pub use settings::{
    EngineSettings, SettingsOverride, DEFAULT_CONSISTENCY_THRESHOLD, DEFAULT_CONVERGENCE_TOLERANCE,
    DEFAULT_MAX_ITERATIONS,
};
