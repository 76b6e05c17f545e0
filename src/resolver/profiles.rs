//! `profiles` expansion.
//!
//! Unlike `$include`, a profile directive only ever appears at a document's
//! root, its content is deep-merged into the root (not at some nested
//! site), and the `profiles` key itself survives resolution so the
//! `RedundantProfile` validator can still see which profiles were named.

use serde_json::{Map, Value};

use crate::diagnostics::{Collector, UnresolvedProfileError};
use crate::merge::merge_into;
use crate::reader::Reader;

pub fn run(reader: &mut Reader, keys: &[String], collector: &mut Collector) {
    for key in keys {
        if collector.aborted() {
            return;
        }
        let Some(profiles_value) = reader.get(key).and_then(|doc| doc.get("profiles")).cloned()
        else {
            continue;
        };

        for name in names_of(&profiles_value) {
            match reader.find_profile(&name, key) {
                None => collector.push(UnresolvedProfileError {
                    origin: key.clone(),
                    profile: name,
                }),
                Some(target_key) => {
                    let profile_doc = reader
                        .get(&target_key)
                        .cloned()
                        .unwrap_or_else(|| Value::Object(Map::new()));
                    if let Some(doc) = reader.get_mut(key) {
                        merge_into(doc, &profile_doc);
                    }
                }
            }
        }
    }
}

fn names_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectMode;
    use serde_json::json;

    #[test]
    fn profile_merges_at_root_and_key_is_kept() {
        let mut reader = Reader::new();
        reader.set(
            "events/activity/thing.json",
            json!({"profiles": "host", "caption": "Thing"}),
        );
        reader.set("profiles/host.json", json!({"attributes": {"ip": {}}}));

        let keys: Vec<String> = reader.keys().map(String::from).collect();
        let mut collector = Collector::new(CollectMode::Deferred);
        run(&mut reader, &keys, &mut collector);

        let resolved = reader.get("events/activity/thing.json").unwrap();
        assert_eq!(resolved["caption"], json!("Thing"));
        assert_eq!(resolved["attributes"], json!({"ip": {}}));
        assert_eq!(resolved["profiles"], json!("host"));
    }

    #[test]
    fn unresolved_profile_reports_error() {
        let mut reader = Reader::new();
        reader.set("a.json", json!({"profiles": "missing"}));

        let keys: Vec<String> = reader.keys().map(String::from).collect();
        let mut collector = Collector::new(CollectMode::Deferred);
        run(&mut reader, &keys, &mut collector);

        assert_eq!(collector.diagnostics().len(), 1);
    }

    #[test]
    fn multiple_profiles_applied_in_order() {
        let mut reader = Reader::new();
        reader.set("a.json", json!({"profiles": ["p1", "p2"]}));
        reader.set("profiles/p1.json", json!({"x": 1}));
        reader.set("profiles/p2.json", json!({"x": 2, "y": 3}));

        let keys: Vec<String> = reader.keys().map(String::from).collect();
        let mut collector = Collector::new(CollectMode::Deferred);
        run(&mut reader, &keys, &mut collector);

        let resolved = reader.get("a.json").unwrap();
        assert_eq!(resolved["x"], json!(1));
        assert_eq!(resolved["y"], json!(3));
    }
}
