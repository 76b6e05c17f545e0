//! Path Matcher - classifies a relative path key into a `RecordType`.
//!
//! This is the single source of truth for path-based classification: the
//! Resolver and the validators never reparse a path themselves, they call
//! `classify` (or one of the `is_*` predicates below) and trust the answer.

use std::fmt;

/// A record type, derived purely from a path key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordType {
    Dictionary,
    Category,
    Event,
    Object,
    Profile,
    Extension,
    Include,
    Unknown,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordType::Dictionary => "dictionary",
            RecordType::Category => "category",
            RecordType::Event => "event",
            RecordType::Object => "object",
            RecordType::Profile => "profile",
            RecordType::Extension => "extension",
            RecordType::Include => "include",
            RecordType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

const EXTENSIONS_PREFIX: &str = "extensions/";

/// Split a path key into `(extension_name, rest)` if it lies under
/// `extensions/<name>/...`.
fn split_extension(path: &str) -> Option<(&str, &str)> {
    let rest = path.strip_prefix(EXTENSIONS_PREFIX)?;
    let (name, tail) = rest.split_once('/')?;
    if name.is_empty() {
        return None;
    }
    Some((name, tail))
}

/// Classify a path key as it would appear in a schema tree, optionally
/// already relative to an extension root (the `tail` half of
/// `split_extension`). Shared by `classify` and `strip_extension_prefix`.
fn classify_root_relative(path: &str) -> RecordType {
    if path == "dictionary.json" {
        return RecordType::Dictionary;
    }
    if path == "categories.json" {
        return RecordType::Category;
    }
    if path == "extension.json" {
        return RecordType::Extension;
    }
    if let Some(rest) = path.strip_prefix("events/") {
        if !rest.is_empty() && rest.ends_with(".json") {
            return RecordType::Event;
        }
    }
    if let Some(rest) = path.strip_prefix("objects/") {
        if !rest.is_empty() && rest.ends_with(".json") {
            return RecordType::Object;
        }
    }
    if let Some(rest) = path.strip_prefix("profiles/") {
        if !rest.is_empty() {
            return RecordType::Profile;
        }
    }
    RecordType::Unknown
}

/// Classify a path key into its `RecordType`. Total: unclassifiable paths
/// are `RecordType::Unknown`, never an error by themselves —
/// it is the validators' job to decide whether encountering `Unknown` where
/// a classification was required is fatal.
pub fn classify(path: &str) -> RecordType {
    if let Some((_, tail)) = split_extension(path) {
        if tail == "extension.json" {
            return RecordType::Extension;
        }
        let classified = classify_root_relative(tail);
        if classified != RecordType::Unknown {
            return classified;
        }
        return RecordType::Unknown;
    }
    classify_root_relative(path)
}

/// The extension name a path lies under, if any.
pub fn in_extension(path: &str) -> Option<&str> {
    split_extension(path).map(|(name, _)| name)
}

/// The directory directly under `events/` within the relevant root
/// (schema root, or extension root for an extension-local event).
///
/// `events/activity/thing.json` -> `Some("activity")`.
/// `extensions/linux/events/process/exec.json` -> `Some("process")`.
pub fn category_of_event(path: &str) -> Option<&str> {
    let relative = strip_extension_prefix(path);
    let rest = relative.strip_prefix("events/")?;
    let (category, _) = rest.split_once('/')?;
    if category.is_empty() {
        None
    } else {
        Some(category)
    }
}

/// Return the path as it would appear if it were at the schema root
/// instead of inside an extension (used to compute search fallbacks).
/// Paths already at the root are returned unchanged.
///
/// This returns a borrowed suffix of `path`, so `category_of_event` above
/// can call it on a path slice without an allocation.
pub fn strip_extension_prefix(path: &str) -> &str {
    match split_extension(path) {
        Some((_, tail)) => tail,
        None => path,
    }
}

pub fn is_dictionary(path: &str) -> bool {
    classify(path) == RecordType::Dictionary
}

pub fn is_category(path: &str) -> bool {
    classify(path) == RecordType::Category
}

pub fn is_event(path: &str) -> bool {
    classify(path) == RecordType::Event
}

pub fn is_object(path: &str) -> bool {
    classify(path) == RecordType::Object
}

pub fn is_profile(path: &str) -> bool {
    classify(path) == RecordType::Profile
}

pub fn is_extension(path: &str) -> bool {
    classify(path) == RecordType::Extension
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_root_dictionary() {
        assert_eq!(classify("dictionary.json"), RecordType::Dictionary);
    }

    #[test]
    fn classifies_categories() {
        assert_eq!(classify("categories.json"), RecordType::Category);
    }

    #[test]
    fn classifies_event() {
        assert_eq!(
            classify("events/activity/thing.json"),
            RecordType::Event
        );
    }

    #[test]
    fn classifies_object() {
        assert_eq!(classify("objects/user.json"), RecordType::Object);
    }

    #[test]
    fn classifies_profile_nested() {
        assert_eq!(
            classify("profiles/host/linux.json"),
            RecordType::Profile
        );
    }

    #[test]
    fn classifies_extension_marker() {
        assert_eq!(
            classify("extensions/linux/extension.json"),
            RecordType::Extension
        );
    }

    #[test]
    fn classifies_extension_dictionary() {
        assert_eq!(
            classify("extensions/linux/dictionary.json"),
            RecordType::Dictionary
        );
    }

    #[test]
    fn classifies_extension_event() {
        assert_eq!(
            classify("extensions/linux/events/process/exec.json"),
            RecordType::Event
        );
    }

    #[test]
    fn unclassified_is_unknown() {
        assert_eq!(classify("README.md"), RecordType::Unknown);
        assert_eq!(classify("events/"), RecordType::Unknown);
    }

    #[test]
    fn in_extension_detects_name() {
        assert_eq!(
            in_extension("extensions/linux/objects/user.json"),
            Some("linux")
        );
        assert_eq!(in_extension("objects/user.json"), None);
    }

    #[test]
    fn empty_extension_name_is_not_an_extension() {
        assert_eq!(in_extension("extensions//objects/user.json"), None);
    }

    #[test]
    fn category_of_event_root() {
        assert_eq!(
            category_of_event("events/activity/thing.json"),
            Some("activity")
        );
    }

    #[test]
    fn category_of_event_in_extension() {
        assert_eq!(
            category_of_event("extensions/linux/events/process/exec.json"),
            Some("process")
        );
    }

    #[test]
    fn category_of_event_none_for_non_event() {
        assert_eq!(category_of_event("objects/user.json"), None);
    }

    #[test]
    fn strip_extension_prefix_passthrough_at_root() {
        assert_eq!(
            strip_extension_prefix("events/activity/thing.json"),
            "events/activity/thing.json"
        );
    }

    #[test]
    fn strip_extension_prefix_removes_extension() {
        assert_eq!(
            strip_extension_prefix("extensions/linux/events/activity/thing.json"),
            "events/activity/thing.json"
        );
    }
}
