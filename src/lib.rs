//! Model Validation
//!
//! Rule-based validation of parsed document trees.
//!
//! This library provides:
//! - A validation engine dispatching rules to tree nodes by element kind
//! - Ordered, per-node diagnostic reports
//! - Pluggable report formatters (plain text, JSON)
//! - An XML-backed model instance with a TOML kind hierarchy
//! - Declarative rules loaded from TOML rule files

pub mod config;
pub mod format;
pub mod model;
pub mod rules;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use format::{JsonFormatter, ReportFormatter, TextFormatter};
pub use model::{Element, KindHierarchy, ModelInstance, Node, TypeRegistry};
pub use rules::{DeclaredRule, RuleLoader};
pub use validation::{
    Diagnostic, DiagnosticSink, Rule, Severity, ValidationEngine, ValidationError,
    ValidationReport,
};
