#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;

use apicompat_core::errors::ExErrorKind;
use apicompat_core::{MemorySink, RunStatus};
use apicompat_engine::commands::{
    apply_engine_command, check, check_with_sink, EngineCommand, EngineCommandResult,
};
use apicompat_store::{RunConfig, SinkTarget};
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

struct Fixture {
    dir: TempDir,
    contract: PathBuf,
    implementation: PathBuf,
}

impl Fixture {
    fn new(contract: &str, implementation: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("ref")).unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        let contract_path = dir.path().join("ref").join("Lib.yaml");
        let implementation_path = dir.path().join("lib").join("Lib.yaml");
        fs::write(&contract_path, contract).unwrap();
        fs::write(&implementation_path, implementation).unwrap();
        Self {
            dir,
            contract: contract_path,
            implementation: implementation_path,
        }
    }

    fn config(&self) -> RunConfig {
        RunConfig {
            contracts: vec![self.contract.clone()],
            implementations: vec![self.implementation.clone()],
            ..RunConfig::default()
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

// ========== Tests ==========

#[test]
fn test_check_reports_removed_overload() {
    let fixture = Fixture::new(CONTRACT, IMPLEMENTATION);
    let mut sink = MemorySink::new();

    let result = check_with_sink(&fixture.config(), &mut sink).unwrap();

    assert_eq!(result.outcome.status, RunStatus::DifferencesFound);
    assert_eq!(result.outcome.total_issues, 1);
    assert!(result.target.is_none());
    assert!(sink.lines()[0].starts_with("MembersMustExist : Foo.Bar.Bar(System.Int32) : "));
}

#[test]
fn test_check_writes_configured_out_file_and_reuses_it_as_baseline() {
    let fixture = Fixture::new(CONTRACT, IMPLEMENTATION);
    let report = fixture.path("report.txt");

    let first = check(&RunConfig {
        out_file: Some(report.clone()),
        ..fixture.config()
    })
    .unwrap();
    assert_eq!(first.target, Some(SinkTarget::File(report.clone())));
    let text = fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("Compat issues with assembly Lib:\n"));
    assert!(text.ends_with("Total Issues: 1\n"));

    let mut sink = MemorySink::new();
    let second = check_with_sink(
        &RunConfig {
            baseline: Some(report),
            ..fixture.config()
        },
        &mut sink,
    )
    .unwrap();
    assert_eq!(second.outcome.status, RunStatus::Success);
    assert_eq!(second.outcome.suppressed, 1);
    assert_eq!(sink.render(), "Total Issues: 0\n");
}

#[test]
fn test_missing_baseline_fails_before_surfaces_are_read() {
    let fixture = Fixture::new(CONTRACT, IMPLEMENTATION);
    let config = RunConfig {
        contracts: vec![fixture.path("absent-ref")],
        implementations: vec![fixture.path("absent-lib")],
        baseline: Some(fixture.path("missing-baseline.txt")),
        ..RunConfig::default()
    };

    let mut sink = MemorySink::new();
    let err = check_with_sink(&config, &mut sink).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::BaselineNotFound);
    assert!(err.run_id().is_some());
    assert!(sink.total.is_none());
}

#[test]
fn test_missing_remap_file_is_configuration_error() {
    let fixture = Fixture::new(CONTRACT, IMPLEMENTATION);
    let config = RunConfig {
        remap_file: Some(fixture.path("missing-remap.txt")),
        ..fixture.config()
    };
    let err = check_with_sink(&config, &mut MemorySink::new()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::RemapFileNotFound);
    assert!(err.is_configuration_error());
}

#[test]
fn test_remap_file_tolerates_namespace_rename() {
    let renamed = IMPLEMENTATION.replace("name: Foo", "name: Foo.V2");
    let fixture = Fixture::new(IMPLEMENTATION, &renamed);
    let remap = fixture.path("remap.txt");
    fs::write(&remap, "Foo -> Foo.V2\n").unwrap();

    let mut sink = MemorySink::new();
    let result = check_with_sink(
        &RunConfig {
            remap_file: Some(remap),
            ..fixture.config()
        },
        &mut sink,
    )
    .unwrap();
    assert_eq!(result.outcome.total_issues, 0, "{:?}", sink.lines());
}

#[test]
fn test_flat_mode_labels_sets_by_path() {
    let fixture = Fixture::new(CONTRACT, IMPLEMENTATION);
    let mut sink = MemorySink::new();
    check_with_sink(
        &RunConfig {
            group_by_assembly: false,
            ..fixture.config()
        },
        &mut sink,
    )
    .unwrap();

    let header = &sink.sections[0].header;
    assert!(header.starts_with("Compat issues between contract set "));
    assert!(header.contains(&fixture.contract.display().to_string()));
}

#[test]
fn test_empty_configuration_is_rejected() {
    let err = apply_engine_command(EngineCommand::Check(RunConfig::default())).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
}

#[test]
fn test_list_rules_command() {
    let result = apply_engine_command(EngineCommand::ListRules).unwrap();
    let EngineCommandResult::Rules(rules) = result else {
        panic!("expected rule list");
    };
    let mut sorted = rules.clone();
    sorted.sort_unstable();
    assert_eq!(rules, sorted);
    assert!(rules.contains(&"MembersMustExist"));
    assert!(rules.contains(&"CannotChangeValueTypeLayout"));
}
