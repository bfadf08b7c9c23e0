//! Plain text output
//!
//! ```text
//! <node-identity>
//! \t<SEVERITY> (<code>): <message>
//! ```

use super::ReportFormatter;
use crate::model::Node;
use crate::validation::Diagnostic;
use std::io;

/// Default formatter: the node identity on its own line, then one tab-indented
/// line per diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl<N: Node> ReportFormatter<N> for TextFormatter {
    fn format_node(
        &mut self,
        out: &mut dyn io::Write,
        node: &N,
        diagnostics: &[Diagnostic<'_, N>],
    ) -> io::Result<()> {
        writeln!(out, "{}", node.id())?;
        for diagnostic in diagnostics {
            writeln!(
                out,
                "\t{} ({}): {}",
                diagnostic.severity(),
                diagnostic.code(),
                diagnostic.message()
            )?;
        }
        Ok(())
    }
}
