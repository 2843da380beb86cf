//! Domain layer containing the decision engine and its primitives.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (error taxonomy, state machine trait)
//! - `ahp` - Analytic Hierarchy Process: comparison matrices, priority solver,
//!   hierarchy composition and the engine facade

pub mod ahp;
pub mod foundation;
