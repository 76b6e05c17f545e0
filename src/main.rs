//! ocsf-lint CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use ocsf_lint::cli::Arguments;

fn main() -> ExitCode {
    let args = Arguments::parse();

    match ocsf_lint::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}
