//! S2: Nested include - `$include` resolution recurses into a nested
//! object, not just the document root.

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{document, SchemaTree};

#[test]
fn include_inside_a_nested_object_merges_at_that_depth() {
    let tree = SchemaTree::new();
    tree.write(
        "a.json",
        json!({"attributes": {"$include": "b.json", "k": {"v": 1}}}),
    );
    tree.write(
        "b.json",
        json!({"attributes": {"k": {"v": 9, "w": 2}, "m": {"v": 3}}}),
    );

    let outcome = tree.run();

    let resolved = document(&outcome, "a.json");
    assert_eq!(
        resolved["attributes"],
        json!({"k": {"v": 1, "w": 2}, "m": {"v": 3}})
    );
}
