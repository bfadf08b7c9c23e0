//! Document Model
//!
//! The tree the engine walks: the generic [`Node`] view, the kind hierarchy
//! used for rule matching, and a concrete XML-backed model instance.

pub mod document;
pub mod node;
pub mod types;

pub use document::{Element, ElementId, ModelInstance};
pub use node::{ExactKinds, KindHierarchy, Node};
pub use types::{TypeDef, TypeRegistry};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a model or loading its types
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("invalid document structure: {0}")]
    Structure(String),

    #[error("invalid type file: {0}")]
    Types(#[from] toml::de::Error),
}
