//! Node Traversal
//!
//! The read-only view of a document tree that the validation engine walks.

use std::fmt;
use std::hash::Hash;

/// A handle into a parsed document tree.
///
/// Implementors own the tree; the engine only borrows nodes for the duration
/// of a validation run. Two nodes are the same node iff their ids are equal.
pub trait Node {
    /// Stable identity of a node for the lifetime of its tree
    type Id: Clone + Eq + Hash + fmt::Display;

    fn id(&self) -> Self::Id;

    /// Runtime element kind (e.g. "bird")
    fn kind(&self) -> &str;

    /// Child nodes in document order
    fn children(&self) -> impl Iterator<Item = &Self>;
}

/// Answers "is a node of `kind` also a `base`?"
pub trait KindHierarchy {
    /// True when `kind` equals `base` or transitively extends it
    fn is_kind_of(&self, kind: &str, base: &str) -> bool;
}

/// Hierarchy without inheritance: kinds only match themselves
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactKinds;

impl KindHierarchy for ExactKinds {
    fn is_kind_of(&self, kind: &str, base: &str) -> bool {
        kind == base
    }
}

impl<H: KindHierarchy + ?Sized> KindHierarchy for &H {
    fn is_kind_of(&self, kind: &str, base: &str) -> bool {
        (**self).is_kind_of(kind, base)
    }
}
