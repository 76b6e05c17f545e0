//! S5: Cycle.

use serde_json::json;

use ocsf_lint::diagnostics::Describe;

use crate::{document, SchemaTree};

#[test]
fn include_cycle_reports_exactly_one_error_and_terminates() {
    let tree = SchemaTree::new();
    tree.write("a.json", json!({"$include": "b.json"}));
    tree.write("b.json", json!({"$include": "a.json"}));

    let outcome = tree.run();

    let cycle_errors = outcome
        .collector
        .diagnostics()
        .iter()
        .filter(|d| d.kind() == ocsf_lint::diagnostics::Kind::InclusionCycle)
        .count();
    assert_eq!(cycle_errors, 1);

    assert!(document(&outcome, "a.json").get("$include").is_none());
    assert!(document(&outcome, "b.json").get("$include").is_none());
}
