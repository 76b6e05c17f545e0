//! Configuration file loading.
//!
//! Walk-up-to-`.git` discovery and serde-with-defaults shape: the config
//! carries per-`Kind` severity overrides plus the Runner's two mode flags
//! (fail-fast vs collect, and whether extension-local dictionaries take
//! precedence over the root one - see DESIGN.md for that decision).

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Kind, Severity};

pub const CONFIG_FILE_NAME: &str = ".ocsflintrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Per-kind severity overrides, keyed by `Kind::flag_name()`
    /// (`"required-keys"`, `"unused-attribute"`, ...).
    #[serde(default)]
    pub severities: HashMap<String, Severity>,
    /// Stop the run at the first FATAL diagnostic instead of collecting
    /// everything.
    #[serde(default)]
    pub fail_fast: bool,
    /// When true, a document inside an extension prefers that extension's
    /// own `dictionary.json` over the root one.
    #[serde(default = "default_extension_dictionaries")]
    pub extension_dictionaries: bool,
}

fn default_extension_dictionaries() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            severities: HashMap::new(),
            fail_fast: false,
            extension_dictionaries: default_extension_dictionaries(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a `severities` key does not name a known
    /// diagnostic kind - failing at load time rather than silently
    /// ignoring a typo'd flag name.
    pub fn validate(&self) -> Result<()> {
        for name in self.severities.keys() {
            if Kind::from_flag_name(name).is_none() {
                anyhow::bail!("Unknown diagnostic kind in 'severities': \"{}\"", name);
            }
        }
        Ok(())
    }

    /// Resolved severity overrides as `(Kind, Severity)` pairs, for
    /// installing into a `Collector` via `Collector::set_severity`.
    pub fn severity_overrides(&self) -> Vec<(Kind, Severity)> {
        self.severities
            .iter()
            .filter_map(|(name, severity)| Kind::from_flag_name(name).map(|kind| (kind, *severity)))
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
