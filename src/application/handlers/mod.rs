//! Application handlers.
//!
//! Handlers that orchestrate domain operations over the ports.

mod evaluate_hierarchy;

pub use evaluate_hierarchy::{EvaluateHierarchyError, EvaluateHierarchyHandler};
