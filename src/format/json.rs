//! JSON Lines output: one object per node.

use super::ReportFormatter;
use crate::model::Node;
use crate::validation::{Diagnostic, Severity};
use serde::Serialize;
use std::io;

#[derive(Debug, Serialize)]
struct NodeRecord<'r> {
    node: String,
    kind: &'r str,
    diagnostics: Vec<DiagnosticRecord<'r>>,
}

#[derive(Debug, Serialize)]
struct DiagnosticRecord<'r> {
    severity: Severity,
    code: i32,
    message: &'r str,
}

/// Writes each node as a JSON object: one per line, or pretty-printed
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    /// Pretty-print each object instead of one per line
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl<N: Node> ReportFormatter<N> for JsonFormatter {
    fn format_node(
        &mut self,
        out: &mut dyn io::Write,
        node: &N,
        diagnostics: &[Diagnostic<'_, N>],
    ) -> io::Result<()> {
        let record = NodeRecord {
            node: node.id().to_string(),
            kind: node.kind(),
            diagnostics: diagnostics
                .iter()
                .map(|d| DiagnosticRecord {
                    severity: d.severity(),
                    code: d.code(),
                    message: d.message(),
                })
                .collect(),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &record)?;
        } else {
            serde_json::to_writer(&mut *out, &record)?;
        }
        writeln!(out)
    }
}
