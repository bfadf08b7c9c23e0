//! Type Registry
//!
//! In-memory kind hierarchy. Kinds are plain names; each may extend one base
//! kind. Loaded from TOML type files.

use super::node::KindHierarchy;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::ModelError;

/// Root type file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TypeFile {
    pub model: ModelMeta,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// Model metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModelMeta {
    pub name: String,
    pub namespace: Option<String>,
    pub description: Option<String>,
}

/// Element type definition
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub extends: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
}

/// Kind hierarchy keyed by type name
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    name: Option<String>,
    types: HashMap<String, TypeDef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from the contents of a type file
    pub fn from_toml_str(content: &str) -> Result<Self, ModelError> {
        let file: TypeFile = toml::from_str(content)?;
        Ok(Self::from(file))
    }

    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_toml_str(&content)?;
        log::debug!(
            "Loaded {} types from {}",
            registry.types.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Model name from the type file, if any
    pub fn model_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Add a type, replacing any previous definition with the same name
    pub fn add_type(&mut self, def: TypeDef) {
        self.types.insert(def.name.clone(), def);
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// List all registered type names, sorted
    pub fn list_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Base types of `kind`, nearest first. Does not include `kind` itself.
    pub fn base_types(&self, kind: &str) -> Vec<&str> {
        let mut bases = Vec::new();
        let mut seen = HashSet::from([kind]);
        let mut current = kind;

        while let Some(parent) = self.types.get(current).and_then(|t| t.extends.as_deref()) {
            if !seen.insert(parent) {
                log::warn!("Type '{}' has a cyclic base chain", kind);
                break;
            }
            bases.push(parent);
            current = parent;
        }

        bases
    }
}

impl KindHierarchy for TypeRegistry {
    fn is_kind_of(&self, kind: &str, base: &str) -> bool {
        kind == base || self.base_types(kind).contains(&base)
    }
}

impl From<TypeFile> for TypeRegistry {
    fn from(file: TypeFile) -> Self {
        let types: HashMap<String, TypeDef> = file
            .types
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();

        for def in types.values() {
            if let Some(base) = &def.extends {
                if !types.contains_key(base) {
                    log::warn!(
                        "Type '{}' extends unknown type '{}'; treating it as a root",
                        def.name,
                        base
                    );
                }
            }
        }

        Self {
            name: Some(file.model.name),
            types,
        }
    }
}
