//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `JudgmentSource` - Supplies the judgment sets for one evaluation

mod judgment_source;

pub use judgment_source::{JudgmentSource, SourceError, SourcedHierarchy};
