//! Engine-level commands.

use apicompat_core::errors::ExError;

use super::check::{check, CheckResult};
use apicompat_store::RunConfig;

/// Commands the engine can execute
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Compare contract and implementation surfaces
    Check(RunConfig),
    /// Enumerate the registered rules without comparing anything
    ListRules,
}

/// Result of applying an engine command
#[derive(Debug)]
pub enum EngineCommandResult {
    Check(CheckResult),
    Rules(Vec<&'static str>),
}

/// Apply an engine command.
///
/// # Errors
///
/// Configuration, resolution and report-sink errors from a check run.
pub fn apply_engine_command(cmd: EngineCommand) -> Result<EngineCommandResult, ExError> {
    match cmd {
        EngineCommand::Check(config) => Ok(EngineCommandResult::Check(check(&config)?)),
        EngineCommand::ListRules => Ok(EngineCommandResult::Rules(super::list_rules::list_rules())),
    }
}
