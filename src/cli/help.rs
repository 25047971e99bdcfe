//! CLI help and command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string for log events (e.g. "admit", "history").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Admit { .. } => "admit",
        Commands::Next { .. } => "next",
        Commands::List { .. } => "list",
        Commands::Show { .. } => "show",
        Commands::Size => "size",
        Commands::History { .. } => "history",
        Commands::Config => "config",
        Commands::Interactive => "interactive",
    }
}

/// Commands that mutate the queue and must be flushed before exit.
pub fn is_mutating(command: &Commands) -> bool {
    matches!(command, Commands::Admit { .. } | Commands::Next { .. } | Commands::Interactive)
}
