//! Validation Report
//!
//! Diagnostics grouped per node. Nodes keep the order in which the engine
//! first recorded them (document order); each node's diagnostics keep the
//! order they were reported in.

use super::diagnostic::{Diagnostic, Severity};
use crate::format::ReportFormatter;
use crate::model::Node;
use std::collections::HashMap;
use std::fmt;
use std::io;

/// Result of one validation run
pub struct ValidationReport<'a, N: Node> {
    entries: Vec<(&'a N, Vec<Diagnostic<'a, N>>)>,
    index: HashMap<N::Id, usize>,
    error_count: usize,
    warning_count: usize,
}

impl<'a, N: Node> Default for ValidationReport<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, N: Node> ValidationReport<'a, N> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Append diagnostics for `node`. Empty batches leave the report unchanged.
    pub(crate) fn record(&mut self, node: &'a N, diagnostics: Vec<Diagnostic<'a, N>>) {
        if diagnostics.is_empty() {
            return;
        }

        for diagnostic in &diagnostics {
            match diagnostic.severity() {
                Severity::Error => self.error_count += 1,
                Severity::Warning => self.warning_count += 1,
            }
        }

        match self.index.get(&node.id()) {
            Some(&slot) => self.entries[slot].1.extend(diagnostics),
            None => {
                self.index.insert(node.id(), self.entries.len());
                self.entries.push((node, diagnostics));
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Number of nodes with at least one diagnostic
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nodes and their diagnostics in document order.
    ///
    /// The slices are borrowed from the report and cannot be modified through
    /// it; use [`ValidationReport::into_results`] for owned, mutable copies.
    pub fn results(&self) -> impl Iterator<Item = (&'a N, &[Diagnostic<'a, N>])> + '_ {
        self.entries
            .iter()
            .map(|(node, diagnostics)| (*node, diagnostics.as_slice()))
    }

    /// Diagnostics recorded for `node`, if any
    pub fn diagnostics_for(&self, node: &N) -> Option<&[Diagnostic<'a, N>]> {
        self.index
            .get(&node.id())
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    /// Consume the report, handing out its per-node diagnostic lists
    pub fn into_results(self) -> Vec<(&'a N, Vec<Diagnostic<'a, N>>)> {
        self.entries
    }

    /// Render the report, calling `formatter` once per node in document order
    pub fn write<W, F>(&self, out: &mut W, formatter: &mut F) -> io::Result<()>
    where
        W: io::Write,
        F: ReportFormatter<N> + ?Sized,
    {
        for (node, diagnostics) in self.results() {
            formatter.format_node(&mut *out, node, diagnostics)?;
        }
        out.flush()
    }
}

impl<N: Node> PartialEq for ValidationReport<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.error_count == other.error_count
            && self.warning_count == other.warning_count
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((a, da), (b, db))| a.id() == b.id() && da == db)
    }
}

impl<N: Node> fmt::Debug for ValidationReport<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (node, diagnostics) in &self.entries {
            map.entry(&node.id().to_string(), diagnostics);
        }
        map.finish()?;
        write!(
            f,
            " ({} errors, {} warnings)",
            self.error_count, self.warning_count
        )
    }
}
