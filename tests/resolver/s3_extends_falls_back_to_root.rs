//! S3: Extends in extension falls back to root.

use serde_json::json;

use crate::{document, kinds, SchemaTree};

#[test]
fn extension_child_resolves_against_a_root_parent_without_warning() {
    let tree = SchemaTree::new();
    tree.write(
        "extensions/e/events/activity/child.json",
        json!({"extends": "parent", "name": "c"}),
    );
    tree.write(
        "events/activity/parent.json",
        json!({"name": "p", "caption": "P"}),
    );

    let outcome = tree.run();

    let resolved = document(&outcome, "extensions/e/events/activity/child.json");
    assert_eq!(resolved["caption"], json!("P"));
    assert_eq!(resolved["name"], json!("c"));
    assert!(!kinds(&outcome).contains(&ocsf_lint::diagnostics::Kind::SiblingInheritance));
}
