//! Command dispatch: bridges CLI args -> directory calls -> output formatting.

pub mod config_cmd;
pub mod students;
pub mod util;

use roster_core::StudentDirectory;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    directory: &StudentDirectory,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Students(args) => students::handle(directory, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
