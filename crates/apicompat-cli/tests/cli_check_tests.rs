#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI integration tests
//!
//! These run the `apicompat` binary against surface files in a temp
//! directory and check exit codes and report output.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ========== Helpers ==========

const CONTRACT: &str = r#"
name: Lib
version: 1.0.0.0
namespaces:
  - name: Foo
    types:
      - name: Bar
        members:
          - name: Bar
            parameters: [{ name: value, type: System.Int32 }]
          - name: Bar
            parameters: [{ name: value, type: System.String }]
"#;

const IMPLEMENTATION: &str = r#"
name: Lib
version: 1.0.0.0
namespaces:
  - name: Foo
    types:
      - name: Bar
        members:
          - name: Bar
            parameters: [{ name: value, type: System.String }]
"#;

fn write_surfaces(dir: &Path, contract: &str, implementation: &str) -> (PathBuf, PathBuf) {
    let contract_path = dir.join("contract.yaml");
    let implementation_path = dir.join("implementation.yaml");
    fs::write(&contract_path, contract).unwrap();
    fs::write(&implementation_path, implementation).unwrap();
    (contract_path, implementation_path)
}

fn apicompat(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_apicompat"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ========== Tests ==========

#[test]
fn test_cli_check_reports_removed_member_and_exits_one() {
    // GIVEN: an implementation missing one overload
    let temp_dir = TempDir::new().unwrap();
    write_surfaces(temp_dir.path(), CONTRACT, IMPLEMENTATION);

    // WHEN: check runs with the report on stdout
    let output = apicompat(
        temp_dir.path(),
        &[
            "check",
            "--contract",
            "contract.yaml",
            "--implementation",
            "implementation.yaml",
        ],
    );

    // THEN: the issue is reported and the exit code signals differences
    assert_eq!(output.status.code(), Some(1));
    let report = stdout(&output);
    assert!(report.contains("Compat issues with assembly Lib:"));
    assert!(report.contains("MembersMustExist : Foo.Bar.Bar(System.Int32) : "));
    assert!(report.ends_with("Total Issues: 1\n"));
}

#[test]
fn test_cli_check_identical_surfaces_exit_zero() {
    let temp_dir = TempDir::new().unwrap();
    write_surfaces(temp_dir.path(), CONTRACT, CONTRACT);

    let output = apicompat(
        temp_dir.path(),
        &[
            "check",
            "--contract",
            "contract.yaml",
            "--implementation",
            "implementation.yaml",
        ],
    );

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output), "Total Issues: 0\n");
}

#[test]
fn test_cli_out_file_then_baseline_suppresses() {
    // GIVEN: a first run writing its report to a file
    let temp_dir = TempDir::new().unwrap();
    write_surfaces(temp_dir.path(), CONTRACT, IMPLEMENTATION);
    let first = apicompat(
        temp_dir.path(),
        &[
            "check",
            "--contract",
            "contract.yaml",
            "--implementation",
            "implementation.yaml",
            "--out",
            "report.txt",
        ],
    );
    assert_eq!(first.status.code(), Some(1));
    assert!(temp_dir.path().join("report.txt").is_file());

    // WHEN: the report is fed back as the baseline
    let second = apicompat(
        temp_dir.path(),
        &[
            "check",
            "--contract",
            "contract.yaml",
            "--implementation",
            "implementation.yaml",
            "--baseline",
            "report.txt",
        ],
    );

    // THEN: nothing is left to report
    assert!(second.status.success());
    assert_eq!(stdout(&second), "Total Issues: 0\n");
}

#[test]
fn test_cli_config_file_with_flag_override() {
    let temp_dir = TempDir::new().unwrap();
    write_surfaces(temp_dir.path(), CONTRACT, IMPLEMENTATION);
    fs::write(
        temp_dir.path().join("apicompat.yaml"),
        "contracts: [contract.yaml]\nimplementations: [contract.yaml]\n",
    )
    .unwrap();

    // Config alone compares the contract with itself
    let clean = apicompat(temp_dir.path(), &["check", "--config", "apicompat.yaml"]);
    assert!(clean.status.success());

    // The flag replaces the configured implementation set
    let overridden = apicompat(
        temp_dir.path(),
        &[
            "check",
            "--config",
            "apicompat.yaml",
            "--implementation",
            "implementation.yaml",
        ],
    );
    assert_eq!(overridden.status.code(), Some(1));
}

#[test]
fn test_cli_missing_baseline_exits_two() {
    let temp_dir = TempDir::new().unwrap();
    write_surfaces(temp_dir.path(), CONTRACT, IMPLEMENTATION);

    let output = apicompat(
        temp_dir.path(),
        &[
            "check",
            "--contract",
            "contract.yaml",
            "--implementation",
            "implementation.yaml",
            "--baseline",
            "nope.txt",
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_BASELINE_NOT_FOUND"));
}

#[test]
fn test_cli_rejects_unknown_report_threshold() {
    let temp_dir = TempDir::new().unwrap();
    let output = apicompat(
        temp_dir.path(),
        &["check", "--report-threshold", "catastrophic"],
    );
    assert!(!output.status.success());
}

#[test]
fn test_cli_list_rules() {
    let temp_dir = TempDir::new().unwrap();
    let output = apicompat(temp_dir.path(), &["list-rules"]);

    assert!(output.status.success());
    let rules: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    let mut sorted = rules.clone();
    sorted.sort();
    assert_eq!(rules, sorted);
    assert!(rules.iter().any(|r| r == "TypesMustExist"));
}
