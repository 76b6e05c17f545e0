//! `RedundantProfileInclude` validator.
//!
//! Flags a document that both lists a profile in `profiles` and reaches the
//! same target through an `$include` - the include already pulls in
//! everything the profile would merge, so the profile entry is inert. This
//! has to run against the Reader as it looked right after `Reader::load`:
//! once the include pass runs, `$include` is gone and there is nothing left
//! to compare against.

use serde_json::Value;

use crate::diagnostics::{Collector, RedundantProfileIncludeWarning};
use crate::reader::Reader;

pub fn check(raw: &Reader, collector: &mut Collector) {
    let mut paths: Vec<&str> = raw.keys().collect();
    paths.sort();

    for path in paths {
        let Some(document) = raw.get(path) else { continue; };
        let Some(object) = document.as_object() else { continue; };

        let profiles = match object.get("profiles") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect::<Vec<_>>(),
            Some(Value::String(s)) => vec![s.as_str()],
            _ => continue,
        };
        if profiles.is_empty() {
            continue;
        }

        let includes: Vec<String> = match object.get("$include") {
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(items)) => items.iter().filter_map(|v| v.as_str().map(String::from)).collect(),
            _ => continue,
        };
        if includes.is_empty() {
            continue;
        }

        let include_targets: Vec<String> = includes
            .iter()
            .filter_map(|fragment| raw.find_include(fragment, path))
            .collect();

        for profile in profiles {
            let Some(profile_target) = raw.find_profile(profile, path) else { continue; };
            if include_targets.contains(&profile_target) {
                collector.push(RedundantProfileIncludeWarning {
                    path: path.to_string(),
                    profile: profile.to_string(),
                });
            }
        }
    }
}
