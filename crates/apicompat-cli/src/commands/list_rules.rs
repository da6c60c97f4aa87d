//! List rules command
//!
//! Usage: apicompat list-rules

use apicompat_engine::commands::{apply_engine_command, EngineCommand, EngineCommandResult};

pub fn execute() -> Result<i32, Box<dyn std::error::Error>> {
    match apply_engine_command(EngineCommand::ListRules)? {
        EngineCommandResult::Rules(rules) => {
            for rule in rules {
                println!("{}", rule);
            }
            Ok(0)
        }
        other => Err(format!("unexpected engine result: {:?}", other).into()),
    }
}
