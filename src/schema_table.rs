//! Type Mapping - the static, declarative table of required/optional keys
//! per `RecordType`.
//!
//! The source tool derived this information by reflecting over runtime
//! type metadata. We replace that with an explicit table indexed by `RecordType`,
//! built once as static data and never constructed at runtime, exactly as
//! the design note prescribes.

use crate::matcher::RecordType;

/// Declares what a record of a given type is allowed and required to carry
/// at its top level, and which of its keys hold nested attribute containers
/// (whose values are themselves records, possibly of a different type, and
/// so are recursively subject to their own entry in this table).
pub struct TypeMapping {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    /// Top-level keys whose value is a map of `name -> attribute record`.
    pub attribute_containers: &'static [&'static str],
}

const EVENT: TypeMapping = TypeMapping {
    required: &["caption", "description", "uid"],
    optional: &[
        "name",
        "extends",
        "profiles",
        "attributes",
        "category",
        "references",
        "associations",
        "deprecated",
        "$include",
    ],
    attribute_containers: &["attributes"],
};

const OBJECT: TypeMapping = TypeMapping {
    required: &["caption", "description"],
    optional: &[
        "name",
        "extends",
        "profiles",
        "attributes",
        "references",
        "associations",
        "deprecated",
        "$include",
    ],
    attribute_containers: &["attributes"],
};

const PROFILE: TypeMapping = TypeMapping {
    required: &["caption", "description"],
    optional: &["name", "attributes", "meta", "annotations", "$include"],
    attribute_containers: &["attributes"],
};

const DICTIONARY: TypeMapping = TypeMapping {
    required: &["attributes", "types"],
    optional: &["name", "caption", "description", "$include"],
    attribute_containers: &["attributes"],
};

const CATEGORY: TypeMapping = TypeMapping {
    required: &["attributes"],
    optional: &["name", "caption", "description", "$include"],
    attribute_containers: &[],
};

const EXTENSION: TypeMapping = TypeMapping {
    required: &["name", "uid", "caption"],
    optional: &["version", "description"],
    attribute_containers: &[],
};

/// Individual entries inside an `attributes` map (event/object/profile/
/// dictionary) are themselves a record type with its own required/optional
/// keys, checked recursively by the required/unknown-keys validators.
const ATTRIBUTE_ENTRY: TypeMapping = TypeMapping {
    required: &["caption"],
    optional: &[
        "description",
        "type",
        "requirement",
        "group",
        "enum",
        "is_array",
        "$include",
    ],
    attribute_containers: &[],
};

/// Look up the Type Mapping for a record type. Returns `None` for record
/// types the Type Mapping deliberately has no static entry for
/// (`Include`, `Unknown`) — those are never checked directly by the
/// required/unknown-keys validators.
pub fn mapping_for(record_type: &RecordType) -> Option<&'static TypeMapping> {
    match record_type {
        RecordType::Event => Some(&EVENT),
        RecordType::Object => Some(&OBJECT),
        RecordType::Profile => Some(&PROFILE),
        RecordType::Dictionary => Some(&DICTIONARY),
        RecordType::Category => Some(&CATEGORY),
        RecordType::Extension => Some(&EXTENSION),
        RecordType::Include | RecordType::Unknown => None,
    }
}

/// The Type Mapping for an entry nested inside an `attributes` container.
pub fn attribute_entry_mapping() -> &'static TypeMapping {
    &ATTRIBUTE_ENTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_requires_caption_description_uid() {
        let mapping = mapping_for(&RecordType::Event).unwrap();
        assert!(mapping.required.contains(&"caption"));
        assert!(mapping.required.contains(&"description"));
        assert!(mapping.required.contains(&"uid"));
    }

    #[test]
    fn event_declares_attributes_as_a_container() {
        let mapping = mapping_for(&RecordType::Event).unwrap();
        assert!(mapping.attribute_containers.contains(&"attributes"));
    }

    #[test]
    fn include_and_unknown_have_no_mapping() {
        assert!(mapping_for(&RecordType::Include).is_none());
        assert!(mapping_for(&RecordType::Unknown).is_none());
    }

    #[test]
    fn dictionary_requires_attributes_and_types() {
        let mapping = mapping_for(&RecordType::Dictionary).unwrap();
        assert!(mapping.required.contains(&"attributes"));
        assert!(mapping.required.contains(&"types"));
    }

    #[test]
    fn attribute_entry_requires_caption_only() {
        let mapping = attribute_entry_mapping();
        assert_eq!(mapping.required, &["caption"]);
    }
}
