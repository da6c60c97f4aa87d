//! ApiCompat CLI
//!
//! Exit status: 0 when no issues remain, 1 when issues were reported,
//! 2 on configuration or runtime errors.

use clap::{Parser, Subcommand};

use apicompat_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "apicompat")]
#[command(about = "ApiCompat - compare an implementation's API surface against its contract", long_about = None)]
struct Cli {
    /// Emit JSON logs on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare contract and implementation surfaces
    Check(commands::check::CheckArgs),
    /// Print every registered rule name
    ListRules,
}

fn main() {
    let cli = Cli::parse();

    init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
        Commands::ListRules => commands::list_rules::execute(),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
