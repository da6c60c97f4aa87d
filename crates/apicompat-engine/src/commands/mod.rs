//! Command orchestration layer.

pub mod check;
pub mod engine_command;
pub mod list_rules;

pub use check::{check, check_with_sink, settings_from_config, CheckResult};
pub use engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use list_rules::list_rules;
