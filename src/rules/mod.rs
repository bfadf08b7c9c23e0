//! Declarative Rules
//!
//! Rules declared in TOML rule files and checked against model instances,
//! so common constraints need no Rust code.

pub mod declared;
pub mod loader;
pub mod schema;

pub use declared::DeclaredRule;
pub use loader::{LoadedRuleSet, RuleLoadError, RuleLoader, RULE_FILE_SUFFIX};
pub use schema::{Check, RuleDef, RuleFile};
