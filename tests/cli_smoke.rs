use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run_validator(args: &[&str]) -> Output {
    let bin_path = std::env::var("CARGO_BIN_EXE_model-validate")
        .unwrap_or_else(|_| "target/debug/model-validate".to_string());

    Command::new(bin_path)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to run model-validate")
}

fn path_arg(name: &str) -> String {
    fixture(name).display().to_string()
}

#[test]
fn errors_exit_with_one() {
    let output = run_validator(&[
        &path_arg("animals.xml"),
        "--types",
        &path_arg("animals.types.toml"),
        "--rules",
        &path_arg("animals.rules.toml"),
        "--no-default-rules",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(
        "tweety\n\tERROR (20): Bird tweety is illegal\n\tWARNING (10): Is not an adult\n"
    ));
    assert_eq!(stdout.lines().count(), 15);
}

#[test]
fn warnings_only_exit_with_zero() {
    // No tweety, so only the age warning fires
    let dir = tempfile::TempDir::new().unwrap();
    let document = dir.path().join("tame.xml");
    std::fs::write(&document, r#"<animals><bird id="polly" age="7"/></animals>"#).unwrap();

    let output = run_validator(&[
        &document.display().to_string(),
        "--types",
        &path_arg("animals.types.toml"),
        "--rules",
        &path_arg("animals.rules.toml"),
        "--no-default-rules",
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "polly\n\tWARNING (10): Is not an adult\n"
    );
}

#[test]
fn json_output() {
    let output = run_validator(&[
        &path_arg("animals.xml"),
        "--types",
        &path_arg("animals.types.toml"),
        "--rules",
        &path_arg("animals.rules.toml"),
        "--no-default-rules",
        "--format",
        "json",
    ]);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let first: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert_eq!(first["node"], "tweety");
    assert_eq!(first["diagnostics"].as_array().unwrap().len(), 2);
}

#[test]
fn malformed_document_exits_with_two() {
    let output = run_validator(&[
        &path_arg("broken.xml"),
        "--rules",
        &path_arg("animals.rules.toml"),
        "--no-default-rules",
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn deep_document_exits_with_two() {
    let dir = tempfile::TempDir::new().unwrap();
    let document = dir.path().join("deep.xml");
    let depth = 50_000;
    std::fs::write(
        &document,
        format!("{}{}", "<flock>".repeat(depth), "</flock>".repeat(depth)),
    )
    .unwrap();

    let output = run_validator(&[
        &document.display().to_string(),
        "--no-default-rules",
        "--max-depth",
        "100",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("nested deeper than 100 levels"), "{stderr}");
}
