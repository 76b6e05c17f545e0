//! `UndefinedAttribute` validator.
//!
//! Every attribute a record declares in its `attributes` map must exist in
//! the dictionary that governs it. A record with no governing dictionary
//! (no `dictionary.json` anywhere on its search path) has nothing to check
//! against, so it is skipped rather than flagged wholesale.

use crate::diagnostics::{Collector, UndefinedAttributeError};
use crate::reader::Reader;
use crate::resolver::dictionary_for;
use crate::schema_table;

pub fn check(reader: &Reader, collector: &mut Collector, extension_dictionaries: bool) {
    for path in reader.iter(|record_type| {
        schema_table::mapping_for(record_type)
            .is_some_and(|mapping| mapping.attribute_containers.contains(&"attributes"))
    }) {
        let Some(attributes) = reader
            .get(path)
            .and_then(|doc| doc.get("attributes"))
            .and_then(|v| v.as_object())
        else {
            continue;
        };

        let Some(dictionary_key) = dictionary_for(reader, path, extension_dictionaries) else {
            continue;
        };
        let Some(defined) = reader
            .get(&dictionary_key)
            .and_then(|doc| doc.get("attributes"))
            .and_then(|v| v.as_object())
        else {
            continue;
        };

        let mut names: Vec<&String> = attributes.keys().collect();
        names.sort();
        for name in names {
            if !defined.contains_key(name) {
                collector.push(UndefinedAttributeError {
                    path: path.to_string(),
                    attribute: name.clone(),
                });
            }
        }
    }
}
