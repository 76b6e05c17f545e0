//! Runner - thin orchestrator tying the Reader, Resolver,
//! validators and Collector together into one call.
//!
//! Everything below this module (matcher, schema_table, reader, merge,
//! resolver, validators, diagnostics) is usable on its own; `run` exists so
//! the CLI layer in `cli::run` has a single call to make.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::diagnostics::{Collector, CollectMode, Severity};
use crate::matcher::{self, RecordType};
use crate::reader::Reader;
use crate::resolver::PassSummary;
use crate::{resolver, validators};

/// Everything a caller needs after a run: the collected diagnostics, a
/// summary of how many fell at each severity, and the resolved tree itself
/// (empty of any document content if loading aborted before resolution ran).
pub struct RunOutcome {
    pub collector: Collector,
    pub documents_loaded: usize,
    pub resolved: Reader,
    /// How many documents each resolver pass visited - `--verbose` progress
    /// reporting (SPEC_FULL.md §1.2).
    pub pass_summary: PassSummary,
    /// Record-type breakdown from the Path Matcher over every loaded
    /// document, by `RecordType`'s display name - the other half of
    /// `--verbose` progress reporting.
    pub record_type_counts: BTreeMap<String, usize>,
}

impl RunOutcome {
    /// Whether the run succeeded: no diagnostic reached ERROR or FATAL
    /// severity (the CLI maps a `false` here to exit code 1).
    pub fn succeeded(&self) -> bool {
        !self.collector.has_blocking()
    }

    pub fn counts(&self) -> std::collections::HashMap<Severity, usize> {
        self.collector.counts()
    }
}

fn record_type_counts(raw: &Reader) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for key in raw.keys() {
        let record_type: RecordType = matcher::classify(key);
        *counts.entry(record_type.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Load `schema_path`, run all four resolver passes, then every validator:
/// `filesystem -> Reader (raw) -> Resolver (in-place) -> Validators (read-only) -> Collector`.
///
/// Severity overrides from `config` are installed on the Collector before
/// anything is recorded, so a kind's severity is fixed for the whole run.
pub fn run(schema_path: &Path, config: &Config) -> Result<RunOutcome> {
    let mode = if config.fail_fast {
        CollectMode::EagerOnFatal
    } else {
        CollectMode::Deferred
    };
    let mut collector = Collector::new(mode);
    for (kind, severity) in config.severity_overrides() {
        collector.set_severity(kind, severity);
    }

    let raw = Reader::load(schema_path, &mut collector)?;
    let documents_loaded = raw.len();
    let types = record_type_counts(&raw);

    let mut reader = raw.clone();
    let mut pass_summary = PassSummary::default();
    if !collector.aborted() {
        pass_summary = resolver::resolve(&mut reader, &mut collector, config.extension_dictionaries);
    }
    if !collector.aborted() {
        validators::run_all(&reader, &raw, &mut collector, config.extension_dictionaries);
    }

    Ok(RunOutcome {
        pass_summary,
        record_type_counts: types,
        collector,
        documents_loaded,
        resolved: reader,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn clean_tree_succeeds() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "dictionary.json",
            r#"{"attributes": {"ip": {"caption": "IP Address"}}, "types": {}}"#,
        );
        write(
            dir.path(),
            "objects/thing.json",
            r#"{"caption": "Thing", "description": "d", "attributes": {"ip": {}}}"#,
        );

        let outcome = run(dir.path(), &Config::default()).unwrap();
        assert!(outcome.succeeded());
        assert_eq!(outcome.documents_loaded, 2);
    }

    #[test]
    fn unresolved_include_is_blocking_by_default() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "objects/thing.json",
            r#"{"$include": "missing.json", "caption": "Thing", "description": "d"}"#,
        );

        let outcome = run(dir.path(), &Config::default()).unwrap();
        assert!(!outcome.succeeded());
    }

    #[test]
    fn severity_override_can_downgrade_a_blocking_kind() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "objects/thing.json",
            r#"{"$include": "missing.json", "caption": "Thing", "description": "d"}"#,
        );

        let mut config = Config::default();
        config
            .severities
            .insert("unresolved-include".to_string(), Severity::Warning);

        let outcome = run(dir.path(), &config).unwrap();
        assert!(outcome.succeeded());
    }

    #[test]
    fn missing_schema_root_is_an_error() {
        let config = Config::default();
        let result = run(Path::new("/does/not/exist/ocsf"), &config);
        assert!(result.is_err());
    }

    #[test]
    fn pass_summary_and_record_type_counts_reflect_the_tree() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "dictionary.json",
            r#"{"attributes": {}, "types": {}}"#,
        );
        write(
            dir.path(),
            "objects/thing.json",
            r#"{"caption": "Thing", "description": "d"}"#,
        );

        let outcome = run(dir.path(), &Config::default()).unwrap();
        assert_eq!(outcome.pass_summary.include, 2);
        assert_eq!(outcome.pass_summary.dictionary, 2);
        assert_eq!(outcome.record_type_counts.get("dictionary"), Some(&1));
        assert_eq!(outcome.record_type_counts.get("object"), Some(&1));
    }
}
