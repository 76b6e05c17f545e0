//! Validators - pure consumers of the resolved Reader.
//!
//! Each function takes only the inputs it needs and returns nothing
//! directly; it pushes its findings onto the shared `Collector`. There is
//! no `Validator` trait - a trait would buy dispatch nobody needs, since
//! the Runner calls each one by name in a fixed list.
//!
//! `UnresolvedTarget` has no function here: the resolver emits
//! `UnresolvedIncludeError` / `UnresolvedExtendsError` / `UnresolvedProfileError`
//! directly onto the Collector, so there is nothing left for
//! a validator to re-derive.

mod name_collision;
mod redundant_profile;
mod required_keys;
mod undefined_attribute;
mod unknown_keys;
mod unused_attribute;

use crate::diagnostics::Collector;
use crate::reader::Reader;

/// Run every validator over a resolved `reader`. `raw` is the Reader as it
/// was immediately after `Reader::load`, before any resolver pass ran -
/// only `RedundantProfile` needs it, to see the original `$include` before
/// the include pass removed it.
pub fn run_all(reader: &Reader, raw: &Reader, collector: &mut Collector, extension_dictionaries: bool) {
    required_keys::check(reader, collector);
    unknown_keys::check(reader, collector);
    unused_attribute::check(reader, collector, extension_dictionaries);
    undefined_attribute::check(reader, collector, extension_dictionaries);
    name_collision::check(reader, collector);
    redundant_profile::check(raw, collector);
}
