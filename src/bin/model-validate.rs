use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};

use model_validation::config::{Config, OutputFormat};
use model_validation::model::Element;
use model_validation::{
    JsonFormatter, ModelInstance, ReportFormatter, RuleLoader, TextFormatter, TypeRegistry,
    ValidationEngine,
};

fn main() -> ExitCode {
    let config = match Config::from_args_and_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.log_level),
    )
    .init();

    match run(&config) {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Validation aborted: {:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Validate the configured document; returns whether errors were found
fn run(config: &Config) -> Result<bool> {
    let types = match &config.types_file {
        Some(path) => TypeRegistry::from_file(path)
            .with_context(|| format!("loading types from {}", path.display()))?,
        None => TypeRegistry::new(),
    };
    let types = Arc::new(types);

    let mut rules = RuleLoader::new(Arc::clone(&types))
        .load_all(&config.rule_files, &config.rule_dirs)
        .context("loading rules")?;
    if rules.is_empty() {
        log::warn!("No rules loaded; the document will trivially pass");
    }

    let model = ModelInstance::from_file_with_max_depth(&config.document, config.max_depth)
        .with_context(|| format!("reading {}", config.document.display()))?;

    let engine = ValidationEngine::new(types.as_ref()).with_max_depth(config.max_depth);
    let report = engine.validate(model.root(), &mut rules)?;
    log::info!(
        "{}: {} errors, {} warnings",
        config.document.display(),
        report.error_count(),
        report.warning_count()
    );

    let mut formatter: Box<dyn ReportFormatter<Element>> = match config.format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter {
            pretty: config.pretty,
        }),
    };
    let stdout = io::stdout();
    report
        .write(&mut stdout.lock(), formatter.as_mut())
        .context("writing report")?;

    Ok(report.has_errors())
}
