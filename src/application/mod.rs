//! Application layer - Handlers and response envelopes.
//!
//! This layer coordinates the judgment source port with the engine and shapes
//! the outcome for transport.

pub mod handlers;
mod tool_response;

pub use handlers::{EvaluateHierarchyError, EvaluateHierarchyHandler};
pub use tool_response::{
    FailureBody, Report, SuccessBody, ToolError, ToolResponse, DEFAULT_REPORT_PRECISION,
};
