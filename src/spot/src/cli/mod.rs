mod arguments;
pub mod commands;
mod process_command;

pub use arguments::{resolve_arguments, ResolvedArguments};
pub use process_command::{process_command, run_query};
