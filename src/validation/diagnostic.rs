//! Diagnostics
//!
//! Findings emitted by rules, and the per-node sink rules emit them through.

use crate::model::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all(serialize = "UPPERCASE", deserialize = "lowercase"))]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single finding about one node
pub struct Diagnostic<'a, N: Node> {
    severity: Severity,
    code: i32,
    message: String,
    node: &'a N,
}

impl<'a, N: Node> Diagnostic<'a, N> {
    pub fn new(severity: Severity, code: i32, message: impl Into<String>, node: &'a N) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            node,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Rule-defined code; not unique across rules
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn node(&self) -> &'a N {
        self.node
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl<N: Node> Clone for Diagnostic<'_, N> {
    fn clone(&self) -> Self {
        Self {
            severity: self.severity,
            code: self.code,
            message: self.message.clone(),
            node: self.node,
        }
    }
}

impl<N: Node> PartialEq for Diagnostic<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.severity == other.severity
            && self.code == other.code
            && self.message == other.message
            && self.node.id() == other.node.id()
    }
}

impl<N: Node> fmt::Debug for Diagnostic<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostic")
            .field("severity", &self.severity)
            .field("code", &self.code)
            .field("message", &self.message)
            .field("node", &self.node.id().to_string())
            .finish()
    }
}

/// Collects the diagnostics rules report for one node.
///
/// A sink is bound to a single node; everything reported through it refers to
/// that node, in call order.
pub struct DiagnosticSink<'a, N: Node> {
    node: &'a N,
    diagnostics: Vec<Diagnostic<'a, N>>,
}

impl<'a, N: Node> DiagnosticSink<'a, N> {
    /// An empty sink for `node`; useful for exercising a rule on its own
    pub fn new(node: &'a N) -> Self {
        Self {
            node,
            diagnostics: Vec::new(),
        }
    }

    /// The node diagnostics are recorded against
    pub fn node(&self) -> &'a N {
        self.node
    }

    pub fn report(&mut self, severity: Severity, code: i32, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::new(severity, code, message, self.node));
    }

    pub fn error(&mut self, code: i32, message: impl Into<String>) {
        self.report(Severity::Error, code, message);
    }

    pub fn warning(&mut self, code: i32, message: impl Into<String>) {
        self.report(Severity::Warning, code, message);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The diagnostics reported so far, in call order
    pub fn into_diagnostics(self) -> Vec<Diagnostic<'a, N>> {
        self.diagnostics
    }
}
