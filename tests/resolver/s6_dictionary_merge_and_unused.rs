//! S6: Dictionary merge and unused.

use serde_json::json;

use ocsf_lint::diagnostics::Describe;

use crate::{document, SchemaTree};

#[test]
fn dictionary_entries_fill_attribute_gaps_and_unused_ones_are_flagged() {
    let tree = SchemaTree::new();
    tree.write(
        "dictionary.json",
        json!({"attributes": {
            "foo": {"type": "string"},
            "bar": {"type": "int"}
        }}),
    );
    tree.write(
        "objects/thing.json",
        json!({
            "name": "thing",
            "attributes": {"foo": {"requirement": "required"}}
        }),
    );

    let outcome = tree.run();

    let resolved = document(&outcome, "objects/thing.json");
    assert_eq!(
        resolved["attributes"]["foo"],
        json!({"type": "string", "requirement": "required"})
    );

    let unused: Vec<_> = outcome
        .collector
        .diagnostics()
        .iter()
        .filter(|d| d.kind() == ocsf_lint::diagnostics::Kind::UnusedAttribute)
        .collect();
    assert_eq!(unused.len(), 1);
}
