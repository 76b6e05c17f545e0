//! End-to-end resolution scenarios (S1-S6), run as black-box tests against
//! a throwaway schema tree built with `tempfile`.
//!
//! These do not shell out to a built binary - there is no snapshot-testing
//! machinery here (see DESIGN.md's dropped-dependency note) - they call
//! `ocsf_lint::runner::run` directly and assert on the returned documents
//! and diagnostics with `pretty_assertions::assert_eq`.

use std::fs;

use ocsf_lint::config::Config;
use ocsf_lint::diagnostics::Kind;
use ocsf_lint::runner::{self, RunOutcome};
use serde_json::Value;
use tempfile::TempDir;

mod s1_simple_include;
mod s2_nested_include;
mod s3_extends_falls_back_to_root;
mod s4_extends_via_sibling;
mod s5_cycle;
mod s6_dictionary_merge_and_unused;

/// A throwaway schema tree on disk, cleaned up on drop.
struct SchemaTree {
    _dir: TempDir,
    root: std::path::PathBuf,
}

impl SchemaTree {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let root = dir.path().to_path_buf();
        Self { _dir: dir, root }
    }

    fn write(&self, relative: &str, content: Value) -> &Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, serde_json::to_string_pretty(&content).unwrap()).expect("write fixture");
        self
    }

    fn run(&self) -> RunOutcome {
        runner::run(&self.root, &Config::default()).expect("runner::run should not error")
    }
}

fn document(outcome: &RunOutcome, relative: &str) -> Value {
    outcome
        .resolved
        .get(relative)
        .cloned()
        .expect("document should exist after resolution")
}

fn kinds(outcome: &RunOutcome) -> Vec<Kind> {
    let mut kinds: Vec<Kind> = outcome
        .collector
        .diagnostics()
        .iter()
        .map(ocsf_lint::diagnostics::Describe::kind)
        .collect();
    kinds.sort_by_key(|kind| format!("{kind:?}"));
    kinds
}
