//! `extends` expansion.
//!
//! `extends` is only ever a top-level directive. Resolution is transitive:
//! before merging a base into its child, the base's own `extends` is
//! resolved first, with the same "currently active" cycle guard as
//! `$include`.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::diagnostics::{Collector, InclusionCycleError, SiblingInheritanceWarning, UnresolvedExtendsError};
use crate::merge::merge_into;
use crate::reader::Reader;

pub fn run(reader: &mut Reader, keys: &[String], collector: &mut Collector) {
    for key in keys {
        if collector.aborted() {
            return;
        }
        let Some(mut doc) = reader.get(key).cloned() else {
            continue;
        };
        let mut active = HashSet::new();
        active.insert(key.clone());
        resolve_extends(reader, &mut doc, key, &mut active, collector);
        reader.set(key, doc);
    }
}

fn resolve_extends(
    reader: &Reader,
    doc: &mut Value,
    origin: &str,
    active: &mut HashSet<String>,
    collector: &mut Collector,
) {
    let Value::Object(map) = doc else {
        return;
    };
    let Some(Value::String(base_name)) = map.remove("extends") else {
        return;
    };

    match reader.find_base(&base_name, origin) {
        None => {
            collector.push(UnresolvedExtendsError {
                origin: origin.to_string(),
                base: base_name,
            });
        }
        Some((target_key, via_sibling)) => {
            if via_sibling {
                collector.push(SiblingInheritanceWarning {
                    origin: origin.to_string(),
                    base: base_name,
                    resolved_path: target_key.clone(),
                });
            }
            if active.contains(&target_key) {
                collector.push(InclusionCycleError {
                    origin: origin.to_string(),
                    target: target_key,
                });
                return;
            }

            active.insert(target_key.clone());
            let mut base_doc = reader
                .get(&target_key)
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            resolve_extends(reader, &mut base_doc, &target_key, active, collector);
            active.remove(&target_key);

            let mut host = Value::Object(std::mem::take(map));
            merge_into(&mut host, &base_doc);
            *map = match host {
                Value::Object(m) => m,
                _ => unreachable!("host was constructed as an object above"),
            };
        }
    }
}
