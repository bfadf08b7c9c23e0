//! Report Formatters
//!
//! Rendering strategies for [`ValidationReport::write`]. A formatter is called
//! once per node that has diagnostics, in document order.
//!
//! [`ValidationReport::write`]: crate::validation::ValidationReport::write

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::model::Node;
use crate::validation::Diagnostic;
use std::io;

/// Renders one node's diagnostics
pub trait ReportFormatter<N: Node> {
    fn format_node(
        &mut self,
        out: &mut dyn io::Write,
        node: &N,
        diagnostics: &[Diagnostic<'_, N>],
    ) -> io::Result<()>;
}

impl<N, F> ReportFormatter<N> for F
where
    N: Node,
    F: FnMut(&mut dyn io::Write, &N, &[Diagnostic<'_, N>]) -> io::Result<()>,
{
    fn format_node(
        &mut self,
        out: &mut dyn io::Write,
        node: &N,
        diagnostics: &[Diagnostic<'_, N>],
    ) -> io::Result<()> {
        self(out, node, diagnostics)
    }
}
