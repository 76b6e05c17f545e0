//! CLI layer - user-facing command-line interface.
//!
//! One command, no subcommands: the tool resolves and validates a schema
//! tree and nothing else.
//!
//! - `args`: CLI argument definitions using clap.
//! - `exit_status`: exit status codes.
//! - `report`: diagnostic reporting and formatting.
//! - `run`: command dispatcher.

use std::process::ExitCode;

use anyhow::Result;

pub use args::Arguments;
pub use exit_status::ExitStatus;

pub mod args;
mod exit_status;
mod report;
mod run;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let status = run::run(args)?;
    Ok(status.into())
}
