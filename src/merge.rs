//! Deep merge semantics - the common substrate of all four
//! resolver passes.
//!
//! Merging produces a value from a *host* (priority holder) and an *other*
//! (lower priority, e.g. an `$include` target, an `extends` base, a
//! `profiles` mix-in, or a dictionary entry):
//!
//! - both objects: merge keys, recursing on keys present in both.
//! - both arrays: the host wins unconditionally (no concatenation).
//! - anything else (shape mismatch, scalar disagreement): the host wins.
//! - `null` on the host wins too - an explicit null is intentional
//!   suppression, not "absent".

use serde_json::Value;

/// Merge `other` into `host` in place: for every key of `other` not already
/// present in `host`, insert it; for every key present in both, merge
/// recursively. `host` always wins on conflict, at every nesting depth.
pub fn merge_into(host: &mut Value, other: &Value) {
    match (host, other) {
        (Value::Object(host_map), Value::Object(other_map)) => {
            for (key, other_value) in other_map {
                match host_map.get_mut(key) {
                    Some(host_value) => merge_into(host_value, other_value),
                    None => {
                        host_map.insert(key.clone(), other_value.clone());
                    }
                }
            }
        }
        // Arrays, scalars, null, and any shape mismatch: host is left
        // untouched, because host already holds the winning value.
        _ => {}
    }
}

/// Merge `other` into `host`, returning the new value rather than mutating
/// in place. Equivalent to cloning `host` and calling `merge_into`, kept as
/// a convenience for call sites (the dictionary pass) that merge into a
/// fresh value rather than an existing document slot.
pub fn merged(host: &Value, other: &Value) -> Value {
    let mut result = host.clone();
    merge_into(&mut result, other);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_merge_keys() {
        let mut host = json!({"x": 1});
        let other = json!({"y": 2, "x": 9});
        merge_into(&mut host, &other);
        assert_eq!(host, json!({"x": 1, "y": 2}));
    }

    #[test]
    fn nested_objects_merge_recursively() {
        let mut host = json!({"attributes": {"k": {"v": 1}}});
        let other = json!({"attributes": {"k": {"v": 9, "w": 2}, "m": {"v": 3}}});
        merge_into(&mut host, &other);
        assert_eq!(
            host,
            json!({"attributes": {"k": {"v": 1, "w": 2}, "m": {"v": 3}}})
        );
    }

    #[test]
    fn arrays_do_not_concatenate_host_wins() {
        let mut host = json!({"a": [1, 2]});
        let other = json!({"a": [3, 4, 5]});
        merge_into(&mut host, &other);
        assert_eq!(host, json!({"a": [1, 2]}));
    }

    #[test]
    fn scalar_disagreement_host_wins() {
        let mut host = json!({"a": "host"});
        let other = json!({"a": "other"});
        merge_into(&mut host, &other);
        assert_eq!(host, json!({"a": "host"}));
    }

    #[test]
    fn shape_mismatch_host_wins() {
        let mut host = json!({"a": {"nested": true}});
        let other = json!({"a": [1, 2, 3]});
        merge_into(&mut host, &other);
        assert_eq!(host, json!({"a": {"nested": true}}));
    }

    #[test]
    fn explicit_null_on_host_wins() {
        let mut host = json!({"a": null});
        let other = json!({"a": "other"});
        merge_into(&mut host, &other);
        assert_eq!(host, json!({"a": null}));
    }

    #[test]
    fn null_on_other_does_not_overwrite_host() {
        let mut host = json!({"a": "host"});
        let other = json!({"a": null});
        merge_into(&mut host, &other);
        assert_eq!(host, json!({"a": "host"}));
    }

    #[test]
    fn host_key_absent_is_filled_from_other() {
        let mut host = json!({});
        let other = json!({"a": {"b": 1}});
        merge_into(&mut host, &other);
        assert_eq!(host, json!({"a": {"b": 1}}));
    }

    #[test]
    fn merged_does_not_mutate_inputs() {
        let host = json!({"x": 1});
        let other = json!({"y": 2});
        let result = merged(&host, &other);
        assert_eq!(host, json!({"x": 1}));
        assert_eq!(result, json!({"x": 1, "y": 2}));
    }
}
