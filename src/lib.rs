//! ocsf-lint - resolves and validates OCSF schema trees.
//!
//! OCSF (Open Cybersecurity Schema Framework) distributes its metaschema as
//! a tree of partial JSON fragments that reference each other through
//! `$include`, `extends`, `profiles`, and an implicit attribute dictionary.
//! This crate ingests such a tree, resolves every reuse directive into
//! fully-expanded record definitions, and reports structural violations.
//!
//! ## Module structure
//!
//! - `matcher`: classifies a path key into a `RecordType` (event, object,
//!   profile, dictionary, ...).
//! - `schema_table`: the static required/optional-key table per `RecordType`.
//! - `reader`: the in-memory path -> document map, with directive-target
//!   search.
//! - `merge`: the host-wins deep merge shared by every resolver pass.
//! - `resolver`: drives `$include` / `profiles` / `extends` / dictionary
//!   expansion, in that fixed order.
//! - `validators`: pure, read-only consumers of a resolved `Reader`.
//! - `diagnostics`: error kinds, severities, and the `Collector`.
//! - `runner`: thin orchestrator tying load -> resolve -> validate together.
//! - `config`: `.ocsflintrc.json` loading.
//! - `cli`: command-line interface layer.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod matcher;
pub mod merge;
pub mod reader;
pub mod resolver;
pub mod runner;
pub mod schema_table;
pub mod validators;
