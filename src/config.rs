//! Configuration management for the model validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Rule directory resolution

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::validation::DEFAULT_MAX_DEPTH;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Node identity followed by one indented line per diagnostic
    #[default]
    Text,
    /// One JSON object per node
    Json,
}

/// Command-line arguments for the model validator
#[derive(Debug, Parser)]
#[command(name = "model-validate")]
#[command(about = "Validate XML model documents against declarative rules")]
#[command(version)]
pub struct Args {
    /// Document to validate
    pub document: PathBuf,

    /// Type file describing the element kind hierarchy
    #[arg(long, help = "TOML file with element type definitions")]
    pub types: Option<PathBuf>,

    /// Rule files, applied in the order given
    #[arg(long = "rules", help = "TOML rule file (repeatable)")]
    pub rules: Vec<PathBuf>,

    /// Skip rule files from the user and workspace rule directories
    #[arg(long)]
    pub no_default_rules: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output instead of one object per line
    #[arg(long)]
    pub pretty: bool,

    /// Deepest element nesting accepted before the document is rejected
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Log level for the validator
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub document: PathBuf,
    pub types_file: Option<PathBuf>,
    /// Explicit rule files, in order
    pub rule_files: Vec<PathBuf>,
    /// Directories searched for `*.rules.toml`, in order
    pub rule_dirs: Vec<PathBuf>,
    pub format: OutputFormat,
    /// Only affects JSON output
    pub pretty: bool,
    pub max_depth: usize,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        if args.max_depth == 0 {
            bail!("--max-depth must be at least 1");
        }

        let rule_dirs = if args.no_default_rules {
            Vec::new()
        } else {
            Self::default_rule_dirs()?
        };

        Ok(Config {
            document: args.document,
            types_file: args.types,
            rule_files: args.rules,
            rule_dirs,
            format: args.format,
            pretty: args.pretty,
            max_depth: args.max_depth,
            log_level: args.log_level,
        })
    }

    /// User-global rules first, then the workspace's
    pub fn default_rule_dirs() -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();

        // ~/.config/model-validate/rules/
        if let Some(config_dir) = dirs::config_dir() {
            dirs.push(config_dir.join("model-validate").join("rules"));
        }

        // ./.model-validate/rules/
        dirs.push(std::env::current_dir()?.join(".model-validate").join("rules"));

        Ok(dirs)
    }
}
