//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `judgments` - Judgment sources (hierarchy documents on disk, in-memory)

pub mod judgments;

pub use judgments::{FileJudgmentSource, InMemoryJudgmentSource};
