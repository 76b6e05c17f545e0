//! `RequiredKeys` validator.
//!
//! For every document whose type has a Type Mapping entry, every required
//! key must be present; if the mapping declares an attribute container,
//! each nested attribute entry must itself satisfy the nested record's
//! (i.e. the attribute-entry) required keys.

use serde_json::Value;

use crate::diagnostics::{Collector, MissingRequiredKeyError};
use crate::matcher::classify;
use crate::reader::Reader;
use crate::schema_table::{self, TypeMapping};

pub fn check(reader: &Reader, collector: &mut Collector) {
    for path in reader.iter(|record_type| schema_table::mapping_for(record_type).is_some()) {
        let document = reader.get(path).expect("iter() only yields existing keys");
        let mapping = schema_table::mapping_for(&classify(path)).expect("filtered above");

        check_required(document, mapping, path, collector);

        for container_key in mapping.attribute_containers {
            let Some(Value::Object(attributes)) = document.get(*container_key) else {
                continue;
            };
            let mut names: Vec<&String> = attributes.keys().collect();
            names.sort();
            let entry_mapping = schema_table::attribute_entry_mapping();
            for name in names {
                let entry = &attributes[name];
                let entry_location = format!("{}#{}.{}", path, container_key, name);
                check_required(entry, entry_mapping, &entry_location, collector);
            }
        }
    }
}

fn check_required(value: &Value, mapping: &TypeMapping, location: &str, collector: &mut Collector) {
    for required_key in mapping.required {
        if value.get(*required_key).is_none() {
            collector.push(MissingRequiredKeyError {
                path: location.to_string(),
                key: required_key.to_string(),
            });
        }
    }
}
