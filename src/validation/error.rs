use thiserror::Error;

/// Faults that abort a validation run.
///
/// Diagnostics are never errors; they are carried in the report.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("rule '{rule}' failed on node '{node}'")]
    RuleFault {
        rule: String,
        node: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("malformed tree: node '{node}' is nested deeper than {max_depth} levels")]
    MalformedTree { node: String, max_depth: usize },
}
