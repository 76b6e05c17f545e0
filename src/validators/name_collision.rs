//! `NameCollision` validator.
//!
//! Two documents of the same record type, within the same root (the schema
//! root, or a single extension), must not declare the same `name`. Profiles
//! and dictionaries name themselves by file path rather than a `name` key
//! and are exempt; only types whose Type Mapping requires `name` - events,
//! objects, categories - participate.

use std::collections::HashMap;

use crate::diagnostics::{Collector, NameCollisionError};
use crate::matcher::{self, RecordType};
use crate::reader::Reader;

pub fn check(reader: &Reader, collector: &mut Collector) {
    let mut seen: HashMap<(RecordType, Option<&str>, String), &str> = HashMap::new();

    let mut paths: Vec<&str> = reader
        .iter(|record_type| {
            matches!(
                record_type,
                RecordType::Event | RecordType::Object | RecordType::Category
            )
        })
        .collect();
    paths.sort();

    for path in paths {
        let record_type = matcher::classify(path);
        let Some(name) = reader
            .get(path)
            .and_then(|doc| doc.get("name"))
            .and_then(|v| v.as_str())
        else {
            continue;
        };
        let scope = matcher::in_extension(path);
        let key = (record_type, scope, name.to_string());

        match seen.get(&key) {
            Some(first_path) => collector.push(NameCollisionError {
                name: name.to_string(),
                first_path: first_path.to_string(),
                second_path: path.to_string(),
            }),
            None => {
                seen.insert(key, path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectMode;
    use serde_json::json;

    #[test]
    fn duplicate_name_in_same_scope_is_reported() {
        let mut reader = Reader::new();
        reader.set("objects/a.json", json!({"name": "thing", "caption": "A"}));
        reader.set("objects/b.json", json!({"name": "thing", "caption": "B"}));

        let mut collector = Collector::new(CollectMode::Deferred);
        check(&reader, &mut collector);

        assert_eq!(collector.diagnostics().len(), 1);
    }

    #[test]
    fn same_name_across_record_types_is_not_a_collision() {
        let mut reader = Reader::new();
        reader.set("objects/a.json", json!({"name": "thing"}));
        reader.set("events/activity/a.json", json!({"name": "thing"}));

        let mut collector = Collector::new(CollectMode::Deferred);
        check(&reader, &mut collector);

        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn same_name_in_different_extensions_is_not_a_collision() {
        let mut reader = Reader::new();
        reader.set("extensions/e1/objects/a.json", json!({"name": "thing"}));
        reader.set("extensions/e2/objects/a.json", json!({"name": "thing"}));

        let mut collector = Collector::new(CollectMode::Deferred);
        check(&reader, &mut collector);

        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn extension_name_does_not_collide_with_root() {
        let mut reader = Reader::new();
        reader.set("objects/a.json", json!({"name": "thing"}));
        reader.set("extensions/e1/objects/a.json", json!({"name": "thing"}));

        let mut collector = Collector::new(CollectMode::Deferred);
        check(&reader, &mut collector);

        assert!(collector.diagnostics().is_empty());
    }
}
