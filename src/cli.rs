//! CLI domain: parse, route, help, output, and presentation only.
//! No queue semantics; the route table dispatches to the queue service.

mod help;
mod interactive;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_admitted, format_called, format_history, format_patient, format_queue,
};
pub use route::{parse_patient, RunContext};
