//! Check command
//!
//! Usage: apicompat check [--config <FILE>] --contract <PATH>... --implementation <PATH>...
//!
//! Flags override the values loaded from `--config`.

use clap::Args;
use std::path::PathBuf;

use apicompat_core::DifferenceType;
use apicompat_engine::commands::{apply_engine_command, EngineCommand, EngineCommandResult};
use apicompat_store::{RunConfig, SinkTarget};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Run configuration file (YAML, or TOML by extension)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Contract surface file or directory (repeatable)
    #[arg(long = "contract", value_name = "PATH")]
    pub contracts: Vec<PathBuf>,

    /// Implementation surface file or directory (repeatable)
    #[arg(long = "implementation", value_name = "PATH")]
    pub implementations: Vec<PathBuf>,

    /// Previously accepted report; matching issues are suppressed
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Name remapping file applied to contract names
    #[arg(long)]
    pub remap_file: Option<PathBuf>,

    /// Report file (default: stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Report all assemblies under a single header
    #[arg(long)]
    pub no_group_by_assembly: bool,

    /// Servicing mode: also run layout-sensitive rules
    #[arg(long)]
    pub mdil: bool,

    /// Skip elements marked EditorBrowsable(Never)
    #[arg(long)]
    pub exclude_non_browsable: bool,

    /// Skip elements carrying this attribute type
    #[arg(long, value_name = "TYPE")]
    pub exclude_attribute: Option<String>,

    /// Lowest difference kind to report (unchanged, changed, added, removed, incompatible)
    #[arg(long, value_name = "KIND")]
    pub report_threshold: Option<DifferenceType>,

    #[arg(long)]
    pub fail_on_missing_implementation: bool,

    #[arg(long)]
    pub fail_on_version_mismatch: bool,

    #[arg(long)]
    pub ignore_design_time_facades: bool,
}

impl CheckArgs {
    fn into_config(self) -> Result<RunConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if !self.contracts.is_empty() {
            config.contracts = self.contracts;
        }
        if !self.implementations.is_empty() {
            config.implementations = self.implementations;
        }
        if self.baseline.is_some() {
            config.baseline = self.baseline;
        }
        if self.remap_file.is_some() {
            config.remap_file = self.remap_file;
        }
        if self.out.is_some() {
            config.out_file = self.out;
        }
        if self.exclude_attribute.is_some() {
            config.exclude_attribute = self.exclude_attribute;
        }
        if let Some(threshold) = self.report_threshold {
            config.report_threshold = threshold;
        }
        config.group_by_assembly &= !self.no_group_by_assembly;
        config.mdil |= self.mdil;
        config.exclude_non_browsable |= self.exclude_non_browsable;
        config.fail_on_missing_implementation |= self.fail_on_missing_implementation;
        config.fail_on_version_mismatch |= self.fail_on_version_mismatch;
        config.ignore_design_time_facades |= self.ignore_design_time_facades;

        Ok(config)
    }
}

pub fn execute(args: CheckArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = args.into_config()?;

    let result = match apply_engine_command(EngineCommand::Check(config))? {
        EngineCommandResult::Check(result) => result,
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    };

    if let Some(SinkTarget::File(path)) = &result.target {
        eprintln!(
            "{} issue(s) written to {}",
            result.outcome.total_issues,
            path.display()
        );
    }

    Ok(if result.outcome.status.is_success() { 0 } else { 1 })
}
