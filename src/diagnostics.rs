//! Diagnostics - error kinds, severities, and the collector that accumulates them.
//!
//! This module is the single channel through which every component of the
//! resolver and the validators reports a problem. Nothing unwinds on a
//! non-fatal diagnostic: the Resolver and Validators push a `Diagnostic` onto
//! a `Collector` and keep going, exactly the same way the severity of an
//! issue is a property of its *kind*, not of the specific occurrence.

use std::fmt;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic.
///
/// Ordered so that `Severity::Fatal > Severity::Error > ... > Severity::Ignore`,
/// which lets the Runner compute "any ERROR or FATAL" with a single comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ignore,
    Info,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ignore" => Some(Self::Ignore),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "fatal" => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Whether a diagnostic at this severity should cause a non-zero exit code.
    pub fn is_blocking(self) -> bool {
        self >= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Ignore => write!(f, "ignore"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// Identifier for each diagnostic kind, used for severity-override lookups
/// (`--required-keys error`, the `severities` config map) and for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    InvalidJson,
    InvalidBasePath,
    UnresolvedInclude,
    UnresolvedExtends,
    UnresolvedProfile,
    InclusionCycle,
    MissingRequiredKey,
    UnknownKey,
    UnusedAttribute,
    UndefinedAttribute,
    NameCollision,
    SiblingInheritance,
    RedundantProfileInclude,
}

impl Kind {
    /// Default severity for this diagnostic kind. This is the baseline the
    /// config file and CLI flags override; it never changes mid-run once a
    /// `Collector` has been constructed.
    pub fn default_severity(self) -> Severity {
        match self {
            Kind::InvalidJson => Severity::Fatal,
            Kind::InvalidBasePath => Severity::Fatal,
            Kind::UnresolvedInclude => Severity::Error,
            Kind::UnresolvedExtends => Severity::Error,
            Kind::UnresolvedProfile => Severity::Error,
            Kind::InclusionCycle => Severity::Error,
            Kind::MissingRequiredKey => Severity::Warning,
            Kind::UnknownKey => Severity::Warning,
            Kind::UnusedAttribute => Severity::Warning,
            Kind::UndefinedAttribute => Severity::Warning,
            Kind::NameCollision => Severity::Warning,
            Kind::SiblingInheritance => Severity::Warning,
            Kind::RedundantProfileInclude => Severity::Warning,
        }
    }

    /// The name used in config files and CLI flags (`--required-keys`, etc.)
    pub fn flag_name(self) -> &'static str {
        match self {
            Kind::InvalidJson => "invalid-json",
            Kind::InvalidBasePath => "invalid-base-path",
            Kind::UnresolvedInclude => "unresolved-include",
            Kind::UnresolvedExtends => "unresolved-extends",
            Kind::UnresolvedProfile => "unresolved-profile",
            Kind::InclusionCycle => "inclusion-cycle",
            Kind::MissingRequiredKey => "required-keys",
            Kind::UnknownKey => "unknown-keys",
            Kind::UnusedAttribute => "unused-attribute",
            Kind::UndefinedAttribute => "undefined-attribute",
            Kind::NameCollision => "name-collision",
            Kind::SiblingInheritance => "sibling-inheritance",
            Kind::RedundantProfileInclude => "redundant-profile",
        }
    }

    /// Every diagnostic kind, in a fixed order - used to build the CLI's
    /// per-validator flags and to validate a config file's `severities` map.
    pub const ALL: [Kind; 13] = [
        Kind::InvalidJson,
        Kind::InvalidBasePath,
        Kind::UnresolvedInclude,
        Kind::UnresolvedExtends,
        Kind::UnresolvedProfile,
        Kind::InclusionCycle,
        Kind::MissingRequiredKey,
        Kind::UnknownKey,
        Kind::UnusedAttribute,
        Kind::UndefinedAttribute,
        Kind::NameCollision,
        Kind::SiblingInheritance,
        Kind::RedundantProfileInclude,
    ];

    /// Look up a `Kind` by its `flag_name()`, the inverse used when parsing
    /// a config file's `severities` map.
    pub fn from_flag_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.flag_name() == name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flag_name())
    }
}

/// `$include` target could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedIncludeError {
    pub origin: String,
    pub fragment: String,
}

/// `extends` target could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedExtendsError {
    pub origin: String,
    pub base: String,
}

/// `profiles` target could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedProfileError {
    pub origin: String,
    pub profile: String,
}

/// A directive graph cycle was detected and broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionCycleError {
    pub origin: String,
    pub target: String,
}

/// A schema file did not parse as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidJsonError {
    pub path: String,
    pub message: String,
}

/// The schema root is missing or unreadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidBasePathError {
    pub path: String,
    pub message: String,
}

/// A required key is absent after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRequiredKeyError {
    pub path: String,
    pub key: String,
}

/// A key not declared by the Type Mapping for this record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyError {
    pub path: String,
    pub key: String,
}

/// A dictionary attribute that no record uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedAttributeError {
    pub dictionary_path: String,
    pub attribute: String,
}

/// An attribute used by a record but absent from the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedAttributeError {
    pub path: String,
    pub attribute: String,
}

/// Two records in the same scope share a `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollisionError {
    pub name: String,
    pub first_path: String,
    pub second_path: String,
}

/// `extends` only resolved through the sibling-category fallback search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingInheritanceWarning {
    pub origin: String,
    pub base: String,
    pub resolved_path: String,
}

/// A document lists a profile and also `$include`s the same profile path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedundantProfileIncludeWarning {
    pub path: String,
    pub profile: String,
}

/// Location and message used by the CLI report printer.
pub struct Location<'a> {
    pub path: &'a str,
    pub message: String,
}

/// Common behavior for every diagnostic kind, dispatched without a vtable
/// via `enum_dispatch`.
#[enum_dispatch]
pub trait Describe {
    fn kind(&self) -> Kind;
    fn location(&self) -> Location<'_>;
}

impl Describe for UnresolvedIncludeError {
    fn kind(&self) -> Kind {
        Kind::UnresolvedInclude
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.origin,
            message: format!("unresolved $include target \"{}\"", self.fragment),
        }
    }
}

impl Describe for UnresolvedExtendsError {
    fn kind(&self) -> Kind {
        Kind::UnresolvedExtends
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.origin,
            message: format!("unresolved extends base \"{}\"", self.base),
        }
    }
}

impl Describe for UnresolvedProfileError {
    fn kind(&self) -> Kind {
        Kind::UnresolvedProfile
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.origin,
            message: format!("unresolved profile \"{}\"", self.profile),
        }
    }
}

impl Describe for InclusionCycleError {
    fn kind(&self) -> Kind {
        Kind::InclusionCycle
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.origin,
            message: format!("directive cycle re-entering \"{}\"", self.target),
        }
    }
}

impl Describe for InvalidJsonError {
    fn kind(&self) -> Kind {
        Kind::InvalidJson
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.path,
            message: self.message.clone(),
        }
    }
}

impl Describe for InvalidBasePathError {
    fn kind(&self) -> Kind {
        Kind::InvalidBasePath
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.path,
            message: self.message.clone(),
        }
    }
}

impl Describe for MissingRequiredKeyError {
    fn kind(&self) -> Kind {
        Kind::MissingRequiredKey
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.path,
            message: format!("missing required key \"{}\"", self.key),
        }
    }
}

impl Describe for UnknownKeyError {
    fn kind(&self) -> Kind {
        Kind::UnknownKey
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.path,
            message: format!("unknown key \"{}\"", self.key),
        }
    }
}

impl Describe for UnusedAttributeError {
    fn kind(&self) -> Kind {
        Kind::UnusedAttribute
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.dictionary_path,
            message: format!("attribute \"{}\" is never used", self.attribute),
        }
    }
}

impl Describe for UndefinedAttributeError {
    fn kind(&self) -> Kind {
        Kind::UndefinedAttribute
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.path,
            message: format!("attribute \"{}\" is not in the dictionary", self.attribute),
        }
    }
}

impl Describe for NameCollisionError {
    fn kind(&self) -> Kind {
        Kind::NameCollision
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.second_path,
            message: format!(
                "name \"{}\" already declared by \"{}\"",
                self.name, self.first_path
            ),
        }
    }
}

impl Describe for SiblingInheritanceWarning {
    fn kind(&self) -> Kind {
        Kind::SiblingInheritance
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.origin,
            message: format!(
                "extends \"{}\" resolved via sibling search to \"{}\"",
                self.base, self.resolved_path
            ),
        }
    }
}

impl Describe for RedundantProfileIncludeWarning {
    fn kind(&self) -> Kind {
        Kind::RedundantProfileInclude
    }
    fn location(&self) -> Location<'_> {
        Location {
            path: &self.path,
            message: format!("profile \"{}\" is both listed and $included", self.profile),
        }
    }
}

/// A single diagnostic event, severity-tagged at collection time.
#[enum_dispatch(Describe)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnresolvedInclude(UnresolvedIncludeError),
    UnresolvedExtends(UnresolvedExtendsError),
    UnresolvedProfile(UnresolvedProfileError),
    InclusionCycle(InclusionCycleError),
    InvalidJson(InvalidJsonError),
    InvalidBasePath(InvalidBasePathError),
    MissingRequiredKey(MissingRequiredKeyError),
    UnknownKey(UnknownKeyError),
    UnusedAttribute(UnusedAttributeError),
    UndefinedAttribute(UndefinedAttributeError),
    NameCollision(NameCollisionError),
    SiblingInheritance(SiblingInheritanceWarning),
    RedundantProfileInclude(RedundantProfileIncludeWarning),
}

/// How the Collector reacts to a newly recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectMode {
    /// Accumulate; the caller inspects everything at the end of the run.
    Deferred,
    /// Stop the run the instant a FATAL diagnostic is recorded.
    EagerOnFatal,
}

/// Accumulates diagnostics for a run and resolves their effective severity.
///
/// A `Kind`'s severity is fixed for the lifetime of the Collector.
/// Sorting is stable by insertion order; callers that want a different
/// presentation order re-sort a copy, never the collector's internal
/// vector.
pub struct Collector {
    overrides: std::collections::HashMap<Kind, Severity>,
    mode: CollectMode,
    diagnostics: Vec<Diagnostic>,
    aborted: bool,
}

impl Collector {
    pub fn new(mode: CollectMode) -> Self {
        Self {
            overrides: std::collections::HashMap::new(),
            mode,
            diagnostics: Vec::new(),
            aborted: false,
        }
    }

    /// Install a severity override for a kind. Must be called before any
    /// diagnostic of that kind is recorded; the contract relies on callers
    /// setting up overrides up front (Runner does this from `Config`).
    pub fn set_severity(&mut self, kind: Kind, severity: Severity) {
        self.overrides.insert(kind, severity);
    }

    pub fn severity_of(&self, kind: Kind) -> Severity {
        self.overrides
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_severity())
    }

    /// Record a diagnostic. Returns `true` if the run should stop (only
    /// possible in `EagerOnFatal` mode on a FATAL-severity diagnostic).
    pub fn push(&mut self, diagnostic: impl Into<Diagnostic>) -> bool {
        let diagnostic = diagnostic.into();
        let severity = self.severity_of(diagnostic.kind());
        if severity == Severity::Ignore {
            return self.aborted;
        }
        self.diagnostics.push(diagnostic);
        if self.mode == CollectMode::EagerOnFatal && severity == Severity::Fatal {
            self.aborted = true;
        }
        self.aborted
    }

    pub fn aborted(&self) -> bool {
        self.aborted
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn severity_for(&self, diagnostic: &Diagnostic) -> Severity {
        self.severity_of(diagnostic.kind())
    }

    /// Whether any recorded diagnostic is ERROR or FATAL once severity
    /// overrides are applied.
    pub fn has_blocking(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| self.severity_for(d).is_blocking())
    }

    /// Counts per severity, for the Runner's summary line.
    pub fn counts(&self) -> std::collections::HashMap<Severity, usize> {
        let mut counts = std::collections::HashMap::new();
        for diagnostic in &self.diagnostics {
            *counts.entry(self.severity_for(diagnostic)).or_insert(0) += 1;
        }
        counts
    }
}
