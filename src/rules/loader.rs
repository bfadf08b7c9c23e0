//! Rule Loading
//!
//! Reads rule files and compiles them into rules. Explicit files load first,
//! then rule directories in the order given; within a directory files load in
//! file name order. Rules keep their order inside each file.

use super::declared::DeclaredRule;
use super::schema::RuleFile;
use crate::model::TypeRegistry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Suffix of rule files picked up from rule directories
pub const RULE_FILE_SUFFIX: &str = ".rules.toml";

#[derive(Debug, Error)]
pub enum RuleLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rule file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("rule '{rule}' in {} has an invalid pattern: {source}", path.display())]
    Pattern {
        path: PathBuf,
        rule: String,
        #[source]
        source: regex::Error,
    },
}

/// The rules of one rule file
#[derive(Debug, Clone)]
pub struct LoadedRuleSet {
    pub name: String,
    pub source_path: Option<PathBuf>,
    pub rules: Vec<DeclaredRule>,
}

/// Compiles rule files against a type registry
#[derive(Debug, Clone)]
pub struct RuleLoader {
    types: Arc<TypeRegistry>,
}

impl RuleLoader {
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        Self { types }
    }

    /// Compile rule file contents; `path` is only used in errors
    pub fn load_str(&self, content: &str, path: &Path) -> Result<LoadedRuleSet, RuleLoadError> {
        let file: RuleFile = toml::from_str(content).map_err(|source| RuleLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut rules = Vec::with_capacity(file.rules.len());
        for def in file.rules {
            let name = def.name.clone();
            let rule = DeclaredRule::compile(def, Arc::clone(&self.types)).map_err(|source| {
                RuleLoadError::Pattern {
                    path: path.to_path_buf(),
                    rule: name,
                    source,
                }
            })?;
            rules.push(rule);
        }

        Ok(LoadedRuleSet {
            name: file.ruleset.name,
            source_path: Some(path.to_path_buf()),
            rules,
        })
    }

    pub fn load_file(&self, path: &Path) -> Result<LoadedRuleSet, RuleLoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| RuleLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = self.load_str(&content, path)?;
        log::debug!(
            "Loaded rule set '{}' ({} rules) from {}",
            set.name,
            set.rules.len(),
            path.display()
        );
        Ok(set)
    }

    /// Load every rule file in `dir`, sorted by file name. A missing directory
    /// yields no rule sets.
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<LoadedRuleSet>, RuleLoadError> {
        if !dir.is_dir() {
            log::debug!("Rule directory {} does not exist, skipping", dir.display());
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(dir).map_err(|source| RuleLoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let paths = rule_paths(dir, entries.map(|entry| entry.map(|e| e.path())))?;
        paths.iter().map(|path| self.load_file(path)).collect()
    }

    /// Load explicit files, then rule directories, flattening into one
    /// ordered rule list
    pub fn load_all(
        &self,
        files: &[PathBuf],
        dirs: &[PathBuf],
    ) -> Result<Vec<DeclaredRule>, RuleLoadError> {
        let mut sets = Vec::new();
        for file in files {
            sets.push(self.load_file(file)?);
        }
        for dir in dirs {
            sets.extend(self.load_dir(dir)?);
        }

        Ok(sets.into_iter().flat_map(|set| set.rules).collect())
    }
}

/// Rule files among directory entries, sorted. An unreadable entry fails the
/// whole directory.
fn rule_paths(
    dir: &Path,
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
) -> Result<Vec<PathBuf>, RuleLoadError> {
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|source| RuleLoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if path.is_file() && is_rule_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_rule_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(RULE_FILE_SUFFIX))
}
