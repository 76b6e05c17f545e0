//! Command dispatcher: loads config, runs the Runner,
//! prints the report, and maps the outcome to an `ExitStatus`.

use anyhow::Result;

use super::args::Arguments;
use super::exit_status::ExitStatus;
use super::report;
use crate::config::{self, Config};

pub fn run(args: Arguments) -> Result<ExitStatus> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("reading config file {:?}: {}", path, e))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("failed to parse config file {:?}: {}", path, e))?;
            config.validate()?;
            config
        }
        None => {
            let start = std::env::current_dir()?;
            config::load_config(&start)?.config
        }
    };

    config.fail_fast = config.fail_fast || args.fail_fast;
    for (kind, severity) in args.severity_overrides() {
        config.severities.insert(kind.flag_name().to_string(), severity);
    }
    config.validate()?;

    let outcome = crate::runner::run(&args.schema_path, &config)?;
    report::report(&outcome, args.verbose);

    Ok(if outcome.succeeded() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    })
}
