//! Judgment Source Adapters
//!
//! Implementations of the JudgmentSource port.
//!
//! ## Available Adapters
//!
//! - **FileJudgmentSource** - Reads a JSON or YAML hierarchy document from disk
//! - **InMemoryJudgmentSource** - Returns a hierarchy held in memory (testing/embedding)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::judgments::{FileJudgmentSource, InMemoryJudgmentSource};
//!
//! let source = FileJudgmentSource::new("./hierarchy.yaml");
//! let source = InMemoryJudgmentSource::new(input);
//! ```

mod file_judgment_source;
mod hierarchy_document;
mod in_memory_judgment_source;

pub use file_judgment_source::FileJudgmentSource;
pub use hierarchy_document::{AlternativeGroup, CriteriaSection, DocumentFormat, HierarchyDocument};
pub use in_memory_judgment_source::InMemoryJudgmentSource;
