//! `UnknownKeys` validator.
//!
//! Any top-level key not in a type's declared `required ∪ optional` set is
//! unknown. Checked on the resolved document, so a key introduced only by a
//! merge (e.g. from a profile) is held to the same standard as an
//! author-written one.

use crate::diagnostics::{Collector, UnknownKeyError};
use crate::matcher::classify;
use crate::reader::Reader;
use crate::schema_table;

pub fn check(reader: &Reader, collector: &mut Collector) {
    for path in reader.iter(|record_type| schema_table::mapping_for(record_type).is_some()) {
        let document = reader.get(path).expect("iter() only yields existing keys");
        let mapping = schema_table::mapping_for(&classify(path)).expect("filtered above");

        let Some(object) = document.as_object() else {
            continue;
        };
        let mut keys: Vec<&String> = object.keys().collect();
        keys.sort();

        for key in keys {
            let known = mapping.required.contains(&key.as_str()) || mapping.optional.contains(&key.as_str());
            if !known {
                collector.push(UnknownKeyError {
                    path: path.to_string(),
                    key: key.clone(),
                });
            }
        }
    }
}
