//! `$include` expansion.
//!
//! A `$include` may appear at any nesting depth; it merges at the directive's
//! own location (the object containing the key), not at the document root.
//! Children are walked depth-first before a node's own `$include` is
//! resolved, so a nested include (S2) sees its sibling keys already in
//! place before the merge happens.
//!
//! The target document is resolved and walked from its own root, same as any
//! other document, but only the slice of it that lives at the *directive's*
//! path - tracked from the host document's root down to the include site -
//! is merged into the host. A top-level `$include` has an empty path, so it
//! degenerates to the whole target document, same as before.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::diagnostics::{Collector, InclusionCycleError, UnresolvedIncludeError};
use crate::merge::merge_into;
use crate::reader::Reader;

/// One step from a document's root down to some nested value.
#[derive(Clone)]
enum PathSegment {
    Key(String),
    Index(usize),
}

/// Walk `value` along `path`, returning the sub-value at that location, or
/// `None` if the path doesn't exist there (shape mismatch or missing key).
fn navigate<'v>(value: &'v Value, path: &[PathSegment]) -> Option<&'v Value> {
    let mut current = value;
    for segment in path {
        current = match (current, segment) {
            (Value::Object(map), PathSegment::Key(key)) => map.get(key)?,
            (Value::Array(items), PathSegment::Index(index)) => items.get(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

pub fn run(reader: &mut Reader, keys: &[String], collector: &mut Collector) {
    for key in keys {
        if collector.aborted() {
            return;
        }
        let Some(mut value) = reader.get(key).cloned() else {
            continue;
        };
        let mut active = HashSet::new();
        active.insert(key.clone());
        let mut path = Vec::new();
        resolve_node(reader, &mut value, key, &mut path, &mut active, collector);
        reader.set(key, value);
    }
}

/// Resolve every `$include` in the subtree rooted at `node`, which lives
/// inside the document at `origin` at `path` from that document's root.
/// `active` is the set of include targets currently being expanded along the
/// current DFS path, shared across the whole call tree for one top-level
/// document.
fn resolve_node(
    reader: &Reader,
    node: &mut Value,
    origin: &str,
    path: &mut Vec<PathSegment>,
    active: &mut HashSet<String>,
    collector: &mut Collector,
) {
    match node {
        Value::Array(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                path.push(PathSegment::Index(index));
                resolve_node(reader, item, origin, path, active, collector);
                path.pop();
            }
        }
        Value::Object(map) => {
            let child_keys: Vec<String> = map
                .keys()
                .filter(|k| k.as_str() != "$include")
                .cloned()
                .collect();
            for child_key in child_keys {
                if let Some(child) = map.get_mut(&child_key) {
                    path.push(PathSegment::Key(child_key.clone()));
                    resolve_node(reader, child, origin, path, active, collector);
                    path.pop();
                }
            }

            let Some(include_value) = map.remove("$include") else {
                return;
            };

            for fragment in fragments_of(&include_value) {
                match reader.find_include(&fragment, origin) {
                    None => {
                        collector.push(UnresolvedIncludeError {
                            origin: origin.to_string(),
                            fragment,
                        });
                    }
                    Some(target_key) => {
                        if active.contains(&target_key) {
                            collector.push(InclusionCycleError {
                                origin: origin.to_string(),
                                target: target_key,
                            });
                            continue;
                        }
                        active.insert(target_key.clone());
                        let mut target_doc = reader
                            .get(&target_key)
                            .cloned()
                            .unwrap_or_else(|| Value::Object(Map::new()));
                        let mut target_path = Vec::new();
                        resolve_node(
                            reader,
                            &mut target_doc,
                            &target_key,
                            &mut target_path,
                            active,
                            collector,
                        );
                        active.remove(&target_key);

                        let spliced = navigate(&target_doc, path)
                            .cloned()
                            .unwrap_or_else(|| Value::Object(Map::new()));

                        let mut host = Value::Object(std::mem::take(map));
                        merge_into(&mut host, &spliced);
                        *map = match host {
                            Value::Object(m) => m,
                            _ => unreachable!("host was constructed as an object above"),
                        };
                    }
                }
            }
        }
        _ => {}
    }
}

fn fragments_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    }
}
