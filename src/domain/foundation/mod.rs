//! Foundation module - Shared domain primitives.
//!
//! Contains the error taxonomy and the state machine trait used by the
//! decision engine.

mod errors;
mod state_machine;

pub use errors::{AhpError, ConsistencyViolation, ErrorKind, MatrixId, ValidationError};
pub use state_machine::StateMachine;
