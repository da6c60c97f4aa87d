//! The `check` command: load everything, compare, report.
//!
//! Baseline and remap files are loaded before any surface so configuration
//! errors surface before the expensive part of the run.

use std::path::PathBuf;

use apicompat_core::errors::ExError;
use apicompat_core::{
    run_comparison, Baseline, RemapTable, ReportSink, ResolutionPolicy, RunLabels, RunOutcome,
    RunSettings,
};
use apicompat_core::{log_op_end, log_op_error, log_op_start};
use apicompat_core_types::RunId;
use apicompat_store::{
    load_baseline, load_remap_file, load_surfaces, open_report_sink, RunConfig, SinkTarget,
};

/// Outcome of a `check` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub run_id: RunId,
    pub outcome: RunOutcome,
    /// Where the report was written; `None` for a caller-supplied sink
    pub target: Option<SinkTarget>,
}

/// Run settings described by a configuration plus its loaded side files
pub fn settings_from_config(
    config: &RunConfig,
    baseline: Option<Baseline>,
    remap: Option<RemapTable>,
) -> RunSettings {
    let mut builder = RunSettings::builder()
        .mdil(config.mdil)
        .exclude_non_browsable(config.exclude_non_browsable)
        .exclude_attribute(config.exclude_attribute.clone())
        .report_threshold(config.report_threshold)
        .group_by_assembly(config.group_by_assembly)
        .resolution(ResolutionPolicy {
            fail_on_missing_implementation: config.fail_on_missing_implementation,
            fail_on_version_mismatch: config.fail_on_version_mismatch,
            ignore_design_time_facades: config.ignore_design_time_facades,
        });
    if let Some(baseline) = baseline {
        builder = builder.baseline(baseline);
    }
    if let Some(table) = remap {
        builder = builder.remap(table);
    }
    builder.build()
}

fn label(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Run a check, writing the report to the configured output.
///
/// # Errors
///
/// - configuration errors (baseline, remap, surfaces, config) before traversal
/// - fatal resolution errors when the configuration asks for them
pub fn check(config: &RunConfig) -> Result<CheckResult, ExError> {
    run_check(config, None)
}

/// Run a check, writing the report to `sink` instead of the configured output.
///
/// # Errors
///
/// As [`check`].
pub fn check_with_sink(config: &RunConfig, sink: &mut dyn ReportSink) -> Result<CheckResult, ExError> {
    run_check(config, Some(sink))
}

fn run_check(config: &RunConfig, sink: Option<&mut dyn ReportSink>) -> Result<CheckResult, ExError> {
    let run_id = RunId::new();
    log_op_start!("check", run_id = run_id.as_str());
    let start = std::time::Instant::now();

    let result = check_impl(config, sink, &run_id).map_err(|e| {
        let e = e.with_run_id(run_id.clone());
        log_op_error!(
            "check",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = run_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "check",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = run_id.as_str(),
        total_issues = result.outcome.total_issues
    );
    Ok(result)
}

fn check_impl(
    config: &RunConfig,
    sink: Option<&mut dyn ReportSink>,
    run_id: &RunId,
) -> Result<CheckResult, ExError> {
    config.validate()?;

    let baseline = load_baseline(config.baseline.as_deref())?;
    let remap = load_remap_file(config.remap_file.as_deref())?;
    let settings = settings_from_config(config, baseline, remap);

    let contract = load_surfaces(&config.contracts)?;
    let implementation = load_surfaces(&config.implementations)?;
    let labels = RunLabels::new(label(&config.contracts), label(&config.implementations));

    let (outcome, target) = match sink {
        Some(sink) => (
            run_comparison(&contract, &implementation, &settings, &labels, sink)?,
            None,
        ),
        None => {
            let mut opened = open_report_sink(config.out_file.as_deref());
            let outcome = run_comparison(
                &contract,
                &implementation,
                &settings,
                &labels,
                opened.sink.as_mut(),
            )?;
            (outcome, Some(opened.target))
        }
    };

    Ok(CheckResult {
        run_id: run_id.clone(),
        outcome,
        target,
    })
}
