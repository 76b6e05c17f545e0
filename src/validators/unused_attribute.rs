//! `UnusedAttribute` validator.
//!
//! Every entry in a dictionary's `attributes` map must be referenced by at
//! least one record's `attributes` mapping, scoped to the dictionary that
//! governs that record (root, or an extension-local dictionary when
//! `extension_dictionaries` routes it there).

use std::collections::{HashMap, HashSet};

use crate::diagnostics::{Collector, UnusedAttributeError};
use crate::matcher::RecordType;
use crate::reader::Reader;
use crate::resolver::dictionary_for;
use crate::schema_table;

pub fn check(reader: &Reader, collector: &mut Collector, extension_dictionaries: bool) {
    let mut used: HashMap<String, HashSet<String>> = HashMap::new();

    for path in reader.iter(|record_type| {
        schema_table::mapping_for(record_type)
            .is_some_and(|mapping| mapping.attribute_containers.contains(&"attributes"))
    }) {
        let Some(dictionary_key) = dictionary_for(reader, path, extension_dictionaries) else {
            continue;
        };
        let Some(attributes) = reader.get(path).and_then(|doc| doc.get("attributes")) else {
            continue;
        };
        let Some(attributes) = attributes.as_object() else {
            continue;
        };
        let entry = used.entry(dictionary_key).or_default();
        entry.extend(attributes.keys().cloned());
    }

    let mut dictionary_paths: Vec<&str> = reader.iter(|record_type| *record_type == RecordType::Dictionary).collect();
    dictionary_paths.sort();

    for dictionary_path in dictionary_paths {
        let Some(attributes) = reader
            .get(dictionary_path)
            .and_then(|doc| doc.get("attributes"))
            .and_then(|v| v.as_object())
        else {
            continue;
        };
        let mut names: Vec<&String> = attributes.keys().collect();
        names.sort();

        let empty = HashSet::new();
        let used_here = used.get(dictionary_path).unwrap_or(&empty);
        for name in names {
            if !used_here.contains(name) {
                collector.push(UnusedAttributeError {
                    dictionary_path: dictionary_path.to_string(),
                    attribute: name.clone(),
                });
            }
        }
    }
}
