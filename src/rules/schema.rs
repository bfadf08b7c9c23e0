//! Rule File Schema
//!
//! Serde types for declarative rule files.

use crate::validation::Severity;
use serde::Deserialize;

/// Root rule file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleFile {
    pub ruleset: RuleSetMeta,
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

/// Rule set metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleSetMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// One declared rule
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleDef {
    pub name: String,
    /// Element kind the rule is bound to
    pub kind: String,
    pub severity: Severity,
    pub code: i32,
    /// Message template; `{id}`, `{kind}`, `{attribute}` and `{value}` are substituted
    pub message: String,
    pub check: Check,
}

/// What a declared rule looks for
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Check {
    RequiredAttribute { attribute: String },
    ForbiddenValue { attribute: String, values: Vec<String> },
    AttributePattern { attribute: String, pattern: String },
    MinValue { attribute: String, min: f64 },
    MaxChildren { max: usize },
    RequiredChild { kind: String },
}

impl Check {
    /// Attribute the check inspects, if any
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Check::RequiredAttribute { attribute }
            | Check::ForbiddenValue { attribute, .. }
            | Check::AttributePattern { attribute, .. }
            | Check::MinValue { attribute, .. } => Some(attribute),
            Check::MaxChildren { .. } | Check::RequiredChild { .. } => None,
        }
    }
}
