//! Rule Contract
//!
//! Rules hold the domain logic; the engine only decides which nodes they see.

use super::diagnostic::DiagnosticSink;
use crate::model::Node;

/// A validation rule bound to one element kind.
///
/// The engine calls [`Rule::check`] only for nodes whose kind is the bound kind
/// or one of its subtypes. Rules take `&mut self` so a rule carrying state is
/// never shared between concurrent validation runs.
pub trait Rule<N: Node> {
    /// Element kind this rule applies to
    fn kind(&self) -> &str;

    /// Name used when reporting a rule fault
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Check one node, reporting findings through `sink`.
    ///
    /// An `Err` is a fault in the rule itself and aborts the whole run.
    fn check(&mut self, node: &N, sink: &mut DiagnosticSink<'_, N>) -> anyhow::Result<()>;
}

impl<N: Node, R: Rule<N> + ?Sized> Rule<N> for Box<R> {
    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn check(&mut self, node: &N, sink: &mut DiagnosticSink<'_, N>) -> anyhow::Result<()> {
        (**self).check(node, sink)
    }
}

/// Rule backed by a closure
pub struct FnRule<F> {
    name: String,
    kind: String,
    check: F,
}

impl<F> FnRule<F> {
    pub fn new<N>(name: impl Into<String>, kind: impl Into<String>, check: F) -> Self
    where
        N: Node,
        F: FnMut(&N, &mut DiagnosticSink<'_, N>) -> anyhow::Result<()>,
    {
        Self {
            name: name.into(),
            kind: kind.into(),
            check,
        }
    }
}

impl<N, F> Rule<N> for FnRule<F>
where
    N: Node,
    F: FnMut(&N, &mut DiagnosticSink<'_, N>) -> anyhow::Result<()>,
{
    fn kind(&self) -> &str {
        &self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn check(&mut self, node: &N, sink: &mut DiagnosticSink<'_, N>) -> anyhow::Result<()> {
        (self.check)(node, sink)
    }
}
