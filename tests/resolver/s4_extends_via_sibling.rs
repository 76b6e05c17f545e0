//! S4: Extends resolved via sibling.

use serde_json::json;

use crate::{document, kinds, SchemaTree};

#[test]
fn falling_back_to_a_sibling_category_base_emits_a_warning() {
    let tree = SchemaTree::new();
    tree.write("events/a/child.json", json!({"extends": "base"}));
    tree.write("events/b/base.json", json!({"name": "b"}));

    let outcome = tree.run();

    let resolved = document(&outcome, "events/a/child.json");
    assert_eq!(resolved["name"], json!("b"));
    assert!(resolved.get("extends").is_none());
    assert!(kinds(&outcome).contains(&ocsf_lint::diagnostics::Kind::SiblingInheritance));
}
