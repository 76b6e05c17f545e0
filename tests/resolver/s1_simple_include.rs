//! S1: Simple include.

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{document, SchemaTree};

#[test]
fn include_merges_host_over_target_and_leaves_no_errors() {
    let tree = SchemaTree::new();
    tree.write("a.json", json!({"$include": "b.json", "x": 1}));
    tree.write("b.json", json!({"y": 2, "x": 9}));

    let outcome = tree.run();

    assert!(outcome.succeeded());
    assert_eq!(document(&outcome, "a.json"), json!({"x": 1, "y": 2}));
}
