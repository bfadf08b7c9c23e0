//! Validation Engine
//!
//! Clean separation of rule dispatch and diagnostic collection from the
//! document model and from rendering.

pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod report;
pub mod rule;

#[cfg(test)]
pub(crate) mod testing;

pub use diagnostic::{Diagnostic, DiagnosticSink, Severity};
pub use engine::{ValidationEngine, DEFAULT_MAX_DEPTH};
pub use error::ValidationError;
pub use report::ValidationReport;
pub use rule::{FnRule, Rule};
