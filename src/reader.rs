//! Reader - the in-memory mapping from normalized relative path to mutable
//! JSON document.
//!
//! A `BTreeMap` backs the store so that `iter()` is lexicographically
//! ordered for free
//! rather than sorting on every call.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use walkdir::WalkDir;

use crate::diagnostics::{Collector, InvalidBasePathError, InvalidJsonError};
use crate::matcher::{self, RecordType};

/// One loaded document plus its resolution bookkeeping.
#[derive(Clone)]
struct Entry {
    value: Value,
    /// Set once the resolver has finished all four passes on this document.
    resolved: bool,
}

/// Holds every document in a schema tree, keyed by a normalized,
/// forward-slash relative path.
#[derive(Clone)]
pub struct Reader {
    documents: BTreeMap<String, Entry>,
}

fn normalize_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().fold(String::new(), |mut acc, c| {
        if !acc.is_empty() {
            acc.push('/');
        }
        acc.push_str(&c.as_os_str().to_string_lossy());
        acc
    })
}

impl Reader {
    pub fn new() -> Self {
        Self {
            documents: BTreeMap::new(),
        }
    }

    /// Walk `root`, parse every `.json` file, and key each by its path
    /// relative to `root`. Symlinks are followed. A file that
    /// fails to parse emits `InvalidJsonError` (FATAL by default) to
    /// `collector` and is skipped; the schema root itself missing or
    /// unreadable emits `InvalidBasePathError` and aborts the load.
    pub fn load(root: &Path, collector: &mut Collector) -> Result<Self> {
        if !root.exists() || !root.is_dir() {
            let error = InvalidBasePathError {
                path: root.display().to_string(),
                message: "schema root does not exist or is not a directory".to_string(),
            };
            collector.push(error.clone());
            bail!(
                "invalid schema root {:?}: {}",
                root,
                error.message
            );
        }

        let mut reader = Self::new();

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry.with_context(|| format!("walking schema root {:?}", root))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let key = normalize_key(root, path);
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {:?}", path))?;
            match serde_json::from_str::<Value>(&content) {
                Ok(value) => {
                    reader.documents.insert(
                        key,
                        Entry {
                            value,
                            resolved: false,
                        },
                    );
                }
                Err(err) => {
                    collector.push(InvalidJsonError {
                        path: key,
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(reader)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.documents.get(key).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.documents.get_mut(key).map(|e| &mut e.value)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        match self.documents.get_mut(key) {
            Some(entry) => entry.value = value,
            None => {
                self.documents.insert(
                    key.to_string(),
                    Entry {
                        value,
                        resolved: false,
                    },
                );
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.documents.contains_key(key)
    }

    pub fn is_resolved(&self, key: &str) -> bool {
        self.documents.get(key).is_some_and(|e| e.resolved)
    }

    pub fn mark_resolved(&mut self, key: &str) {
        if let Some(entry) = self.documents.get_mut(key) {
            entry.resolved = true;
        }
    }

    /// Path keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Path keys whose classification satisfies `predicate`, in
    /// lexicographic order.
    pub fn iter(&self, predicate: impl Fn(&RecordType) -> bool) -> impl Iterator<Item = &str> {
        self.documents
            .keys()
            .filter(move |key| predicate(&matcher::classify(key)))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Resolve a `$include` fragment originating from `origin`: extension
    /// root first (if `origin` lies in one), then the schema root.
    pub fn find_include(&self, fragment: &str, origin: &str) -> Option<String> {
        let mut candidates = Vec::new();
        if let Some(extension) = matcher::in_extension(origin) {
            candidates.push(format!("extensions/{}/{}", extension, fragment));
        }
        candidates.push(fragment.to_string());
        self.first_existing(&candidates, fragment.ends_with(".json"))
    }

    /// Resolve an `extends` base name originating from `origin`: the
    /// directory-chain primary search, falling back to a sibling-category
    /// search if the primary one finds nothing.
    /// Returns the resolved key plus whether the sibling fallback was used
    /// (so the caller can emit `SiblingInheritanceWarning`).
    pub fn find_base(&self, name: &str, origin: &str) -> Option<(String, bool)> {
        if let Some(key) = self.find_base_primary(name, origin) {
            return Some((key, false));
        }
        self.find_base_sibling(name, origin).map(|k| (k, true))
    }

    fn find_base_primary(&self, name: &str, origin: &str) -> Option<String> {
        let origin_dir = parent_dir(origin);
        let stripped = matcher::strip_extension_prefix(origin);
        let stripped_dir = parent_dir(stripped);
        let target_name = format!("{}.json", name);

        // Two chains walked in lockstep, one level at a time: the
        // extension-local directory chain (capped at the extension root,
        // never escaping into `extensions/` itself) and the schema-root
        // chain (up to its top-level directory - never a bare `<name>.json`
        // at the schema root itself).
        let ext_chain: Vec<String> = match extension_root(origin) {
            Some(floor) if origin_dir != stripped_dir => ancestors_until(&origin_dir, &floor),
            _ => Vec::new(),
        };
        let root_chain = ancestors(&stripped_dir);

        let mut candidates = Vec::new();
        for level in 0..ext_chain.len().max(root_chain.len()) {
            if let Some(dir) = ext_chain.get(level) {
                candidates.push(join(dir, &target_name));
            }
            if let Some(dir) = root_chain.get(level) {
                let candidate = join(dir, &target_name);
                if !candidates.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
        }
        self.first_existing(&candidates, true)
    }

    fn find_base_sibling(&self, name: &str, origin: &str) -> Option<String> {
        let stripped = matcher::strip_extension_prefix(origin);
        let prefix = matcher::in_extension(origin)
            .map(|e| format!("extensions/{}/", e))
            .unwrap_or_default();

        let mut dir = parent_dir(stripped);
        loop {
            if let Some(parent) = dir.rsplit_once('/') {
                let category_root = parent.0;
                let target_name = format!("{}.json", name);
                // Every sibling directory directly under `category_root`.
                let siblings: Vec<&str> = self
                    .documents
                    .keys()
                    .filter_map(|key| {
                        let local = key.strip_prefix(&prefix).unwrap_or(key);
                        let sub = local.strip_prefix(category_root)?.strip_prefix('/')?;
                        sub.split_once('/').map(|(seg, _)| seg)
                    })
                    .collect();
                for sibling in siblings {
                    let candidate = format!("{}{}/{}/{}", prefix, category_root, sibling, target_name);
                    if self.contains(&candidate) {
                        return Some(candidate);
                    }
                }
            }
            if dir.is_empty() {
                break;
            }
            dir = parent_dir(&dir);
        }
        None
    }

    /// Resolve a `profiles` name originating from `origin`: extension-local
    /// profiles directory, then root profiles directory, then extension
    /// root, then schema root.
    pub fn find_profile(&self, name: &str, origin: &str) -> Option<String> {
        let mut candidates = Vec::new();
        if let Some(extension) = matcher::in_extension(origin) {
            candidates.push(format!("extensions/{}/profiles/{}", extension, name));
        }
        candidates.push(format!("profiles/{}", name));
        if let Some(extension) = matcher::in_extension(origin) {
            candidates.push(format!("extensions/{}/{}", extension, name));
        }
        candidates.push(name.to_string());
        self.first_existing(&candidates, true)
    }

    /// Try each candidate verbatim, then (if `try_json_suffix` and it
    /// doesn't already end in `.json`) with `.json` appended - shared by all
    /// three search orders since each allows the same suffix fallback.
    fn first_existing(&self, candidates: &[String], try_json_suffix: bool) -> Option<String> {
        for candidate in candidates {
            if self.contains(candidate) {
                return Some(candidate.clone());
            }
            if try_json_suffix && !candidate.ends_with(".json") {
                let with_suffix = format!("{}.json", candidate);
                if self.contains(&with_suffix) {
                    return Some(with_suffix);
                }
            }
        }
        None
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

fn parent_dir(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => String::new(),
    }
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Every ancestor directory of `dir`, from `dir` itself up to its
/// top-level component, closest first. Stops short of the schema root
/// itself (the empty path) - spec.md §4.5.4's worked example enumerates
/// exactly 5 candidates for a 2-level-deep extension child, ending at
/// `extensions/e/b.json`, never a bare `b.json` at the schema root.
fn ancestors(dir: &str) -> Vec<String> {
    let mut result = vec![dir.to_string()];
    let mut current = dir.to_string();
    while let Some((parent, _)) = current.rsplit_once('/') {
        result.push(parent.to_string());
        current = parent.to_string();
    }
    result
}

/// Ancestors of `dir`, from `dir` itself up to and including `floor`, never
/// walking past it. Used for the extension-local half of the `extends`
/// search so it never escapes into `extensions/` or the schema root.
fn ancestors_until(dir: &str, floor: &str) -> Vec<String> {
    let mut result = vec![dir.to_string()];
    let mut current = dir.to_string();
    while current != floor {
        match current.rsplit_once('/') {
            Some((parent, _)) => {
                result.push(parent.to_string());
                current = parent.to_string();
            }
            None => break,
        }
    }
    result
}

/// The directory a path's extension subtree is rooted at, e.g.
/// `extensions/linux/events/...` -> `Some("extensions/linux")`.
fn extension_root(path: &str) -> Option<String> {
    matcher::in_extension(path).map(|name| format!("extensions/{}", name))
}
