//! Run entry points: resolution checks, mapping, traversal.

use std::cmp::Ordering;

use crate::errors::{ApiCompatError, ExError};
use crate::mapping::build_mapping;
use crate::model::AssemblyDef;
use crate::report::ReportSink;
use crate::rules::RuleRegistry;
use crate::settings::RunSettings;
use crate::traversal::{ReportDriver, RunLabels, RunOutcome};
use crate::{log_op_end, log_op_error, log_op_start};

/// Compare two assembly sets and write the report to `sink`.
///
/// Differences are output, not errors: a run that finds incompatibilities
/// returns `Ok` with [`crate::traversal::RunStatus::DifferencesFound`].
///
/// # Errors
///
/// - `MissingImplementation` / `VersionMismatch` when the resolution policy
///   makes them fatal
/// - `ReportSink` when writing the report fails
pub fn run_comparison(
    contract: &[AssemblyDef],
    implementation: &[AssemblyDef],
    settings: &RunSettings,
    labels: &RunLabels,
    sink: &mut dyn ReportSink,
) -> Result<RunOutcome, ExError> {
    log_op_start!(
        "run_comparison",
        contract_assemblies = contract.len(),
        implementation_assemblies = implementation.len()
    );
    let start = std::time::Instant::now();

    let result = run_comparison_impl(contract, implementation, settings, labels, sink).map_err(|e| {
        log_op_error!(
            "run_comparison",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "run_comparison",
        duration_ms = start.elapsed().as_millis() as u64,
        total_issues = result.total_issues,
        suppressed = result.suppressed
    );

    Ok(result)
}

fn run_comparison_impl(
    contract: &[AssemblyDef],
    implementation: &[AssemblyDef],
    settings: &RunSettings,
    labels: &RunLabels,
    sink: &mut dyn ReportSink,
) -> Result<RunOutcome, ExError> {
    let policy = settings.resolution();

    let contract: Vec<&AssemblyDef> = contract
        .iter()
        .filter(|asm| {
            let skip = policy.ignore_design_time_facades && asm.is_facade;
            if skip {
                tracing::debug!(assembly = %asm.name, "Skipping design-time facade");
            }
            !skip
        })
        .collect();
    let implementation: Vec<&AssemblyDef> = implementation.iter().collect();

    for asm in contract.iter().chain(&implementation) {
        for reference in &asm.unresolved_references {
            tracing::warn!(
                assembly = %asm.name,
                reference = %reference,
                "Unable to resolve assembly reference"
            );
        }
    }

    for asm in &contract {
        match implementation.iter().find(|i| i.name == asm.name) {
            None if policy.fail_on_missing_implementation => {
                return Err(ExError::from(ApiCompatError::MissingImplementation {
                    assembly: asm.name.clone(),
                })
                .with_op("run_comparison"));
            }
            None => tracing::warn!(
                assembly = %asm.name,
                "Could not find matching implementation assembly"
            ),
            Some(found)
                if policy.fail_on_version_mismatch
                    && found.compare_version(asm) == Ordering::Less =>
            {
                return Err(ExError::from(ApiCompatError::VersionMismatch {
                    assembly: asm.name.clone(),
                    contract: asm.version.clone(),
                    implementation: found.version.clone(),
                })
                .with_op("run_comparison"));
            }
            Some(_) => {}
        }
    }

    let forest = build_mapping(&contract, &implementation, settings.comparer(), settings.filter());
    ReportDriver::new(settings).run(&forest, labels, sink)
}

/// Names of the registered rules, sorted. No comparison is performed.
pub fn list_rules(registry: &RuleRegistry) -> Vec<&'static str> {
    let rules = registry.list_rules();
    tracing::debug!(rules = rules.len(), "Listing rules");
    rules
}
