//! Dictionary merge.
//!
//! Runs last because it needs the final key set of each record's
//! `attributes` map, after includes, profiles, and extends have all had a
//! chance to add or remove entries. Matching is by dictionary key, never by
//! a `name` property on the attribute entry.

use serde_json::Value;

use crate::diagnostics::Collector;
use crate::matcher::{self, RecordType};
use crate::merge::merge_into;
use crate::reader::Reader;

pub fn run(
    reader: &mut Reader,
    keys: &[String],
    collector: &mut Collector,
    extension_dictionaries: bool,
) {
    for key in keys {
        if collector.aborted() {
            return;
        }
        // The dictionary is the source of truth for attribute details, not
        // a consumer of itself.
        if matcher::classify(key) == RecordType::Dictionary {
            continue;
        }

        let Some(dictionary_key) = dictionary_for(reader, key, extension_dictionaries) else {
            continue;
        };
        let Some(Value::Object(dictionary_attributes)) = reader
            .get(&dictionary_key)
            .and_then(|doc| doc.get("attributes"))
            .cloned()
        else {
            continue;
        };

        let Some(Value::Object(attributes)) = reader.get_mut(key).and_then(|doc| doc.get_mut("attributes"))
        else {
            continue;
        };

        for (attribute_name, entry) in attributes.iter_mut() {
            if let Some(dictionary_entry) = dictionary_attributes.get(attribute_name) {
                merge_into(entry, dictionary_entry);
            }
        }
    }
}

/// Resolve which `dictionary.json` (if any) governs attributes for a
/// document at `origin`: its own extension's dictionary when
/// `extension_dictionaries` is enabled and present, else the root
/// dictionary. Exposed for the `UnusedAttribute`/`UndefinedAttribute`
/// validators so they see exactly the dictionary this pass used.
pub fn dictionary_for(reader: &Reader, origin: &str, extension_dictionaries: bool) -> Option<String> {
    if extension_dictionaries
        && let Some(extension) = matcher::in_extension(origin)
    {
        let candidate = format!("extensions/{}/dictionary.json", extension);
        if reader.contains(&candidate) {
            return Some(candidate);
        }
    }
    reader.contains("dictionary.json").then(|| "dictionary.json".to_string())
}
