//! CLI argument definitions using clap.
//!
//! A single command: there is one thing this tool does (resolve and
//! validate a schema tree), so there is no `Subcommand` here.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::diagnostics::{Kind, Severity};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Root directory of the schema tree to resolve and validate.
    pub schema_path: PathBuf,

    /// Path to a config file (overrides the usual walk-up-to-`.git` search).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Stop resolving at the first diagnostic at or above `Fatal` severity,
    /// instead of collecting everything the tree has to report.
    #[arg(long)]
    pub fail_fast: bool,

    /// Report pass-by-pass progress in addition to diagnostics.
    #[arg(short, long)]
    pub verbose: bool,

    /// Severity for `MissingRequiredKey` diagnostics.
    #[arg(long = "required-keys", value_enum)]
    pub required_keys: Option<SeverityArg>,

    /// Severity for `UnknownKey` diagnostics.
    #[arg(long = "unknown-keys", value_enum)]
    pub unknown_keys: Option<SeverityArg>,

    /// Severity for `UnusedAttribute` diagnostics.
    #[arg(long = "unused-attribute", value_enum)]
    pub unused_attribute: Option<SeverityArg>,

    /// Severity for `UndefinedAttribute` diagnostics.
    #[arg(long = "undefined-attribute", value_enum)]
    pub undefined_attribute: Option<SeverityArg>,

    /// Severity for `NameCollision` diagnostics.
    #[arg(long = "name-collision", value_enum)]
    pub name_collision: Option<SeverityArg>,

    /// Severity for `RedundantProfileInclude` diagnostics.
    #[arg(long = "redundant-profile", value_enum)]
    pub redundant_profile: Option<SeverityArg>,
}

impl Arguments {
    /// Severity overrides passed on the command line, keyed by `Kind::flag_name()`
    /// so they can be merged into a `Config`'s `severities` map the same way
    /// the config file's keys are.
    pub fn severity_overrides(&self) -> Vec<(Kind, Severity)> {
        let mut overrides = Vec::new();
        let mut push = |kind: Kind, value: Option<SeverityArg>| {
            if let Some(value) = value {
                overrides.push((kind, value.into()));
            }
        };
        push(Kind::MissingRequiredKey, self.required_keys);
        push(Kind::UnknownKey, self.unknown_keys);
        push(Kind::UnusedAttribute, self.unused_attribute);
        push(Kind::UndefinedAttribute, self.undefined_attribute);
        push(Kind::NameCollision, self.name_collision);
        push(Kind::RedundantProfileInclude, self.redundant_profile);
        overrides
    }
}

/// CLI-facing mirror of `diagnostics::Severity`, kept separate so the
/// diagnostics module has no `clap` dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum SeverityArg {
    Ignore,
    Info,
    Warning,
    Error,
    Fatal,
}

impl From<SeverityArg> for Severity {
    fn from(value: SeverityArg) -> Self {
        match value {
            SeverityArg::Ignore => Severity::Ignore,
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
            SeverityArg::Fatal => Severity::Fatal,
        }
    }
}
