//! Resolver / Processor - the core.
//!
//! Drives directive expansion in the fixed pass order includes name static
//! content before profiles namespace it, before extends computes the final
//! attribute set, before the dictionary merge sees the final keys:
//!
//! 1. `$include` expansion (`include`)
//! 2. `profiles` expansion (`profiles`)
//! 3. `extends` expansion (`extends`)
//! 4. dictionary merge (`dictionary`)
//!
//! Idempotency is tracked per document via
//! `Reader::is_resolved` / `mark_resolved`: a document already marked
//! resolved is left untouched by every pass, so resolving an
//! already-resolved Reader is a no-op.

mod dictionary;
mod extends;
mod include;
mod profiles;

use crate::diagnostics::Collector;
use crate::reader::Reader;

pub use dictionary::dictionary_for;

/// How many documents each of the four passes actually visited. Reported by
/// `--verbose` (SPEC_FULL.md §1.2); every pass visits the same unresolved-key
/// set unless the Collector aborts partway through, so a pass left at `0`
/// after a non-zero earlier one means the run stopped on a FATAL before
/// reaching it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub include: usize,
    pub profiles: usize,
    pub extends: usize,
    pub dictionary: usize,
}

/// Run all four passes over every unresolved document in `reader`.
///
/// `extension_dictionaries` mirrors `Config::extension_dictionaries`
///: when
/// true, a document inside an extension prefers that extension's own
/// `dictionary.json` over the root one.
pub fn resolve(reader: &mut Reader, collector: &mut Collector, extension_dictionaries: bool) -> PassSummary {
    let keys: Vec<String> = reader
        .keys()
        .filter(|key| !reader.is_resolved(key))
        .map(String::from)
        .collect();

    let mut summary = PassSummary::default();
    if keys.is_empty() {
        return summary;
    }

    include::run(reader, &keys, collector);
    summary.include = keys.len();
    if collector.aborted() {
        return summary;
    }
    profiles::run(reader, &keys, collector);
    summary.profiles = keys.len();
    if collector.aborted() {
        return summary;
    }
    extends::run(reader, &keys, collector);
    summary.extends = keys.len();
    if collector.aborted() {
        return summary;
    }
    dictionary::run(reader, &keys, collector, extension_dictionaries);
    summary.dictionary = keys.len();
    if collector.aborted() {
        return summary;
    }

    for key in &keys {
        reader.mark_resolved(key);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectMode;
    use serde_json::json;

    #[test]
    fn resolve_is_idempotent() {
        let mut reader = Reader::new();
        reader.set("a.json", json!({"$include": "b.json", "x": 1}));
        reader.set("b.json", json!({"y": 2, "x": 9}));

        let mut collector = Collector::new(CollectMode::Deferred);
        resolve(&mut reader, &mut collector, true);
        let once = reader.get("a.json").cloned().unwrap();

        resolve(&mut reader, &mut collector, true);
        let twice = reader.get("a.json").cloned().unwrap();

        assert_eq!(once, twice);
        assert_eq!(once, json!({"x": 1, "y": 2}));
    }

    #[test]
    fn resolve_on_empty_reader_is_a_noop() {
        let mut reader = Reader::new();
        let mut collector = Collector::new(CollectMode::Deferred);
        resolve(&mut reader, &mut collector, true);
        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn pass_summary_counts_every_pass_when_nothing_aborts() {
        let mut reader = Reader::new();
        reader.set("a.json", json!({"x": 1}));
        reader.set("b.json", json!({"y": 2}));

        let mut collector = Collector::new(CollectMode::Deferred);
        let summary = resolve(&mut reader, &mut collector, true);

        assert_eq!(summary.include, 2);
        assert_eq!(summary.profiles, 2);
        assert_eq!(summary.extends, 2);
        assert_eq!(summary.dictionary, 2);
    }

    #[test]
    fn pass_summary_on_empty_reader_is_all_zero() {
        let mut reader = Reader::new();
        let mut collector = Collector::new(CollectMode::Deferred);
        let summary = resolve(&mut reader, &mut collector, true);
        assert_eq!(summary, PassSummary::default());
    }
}
