//! Ruleset directory walker
//!
//! A ruleset root holds one subdirectory per ruleset. A subdirectory counts as
//! a ruleset only when it contains the manifest file; every other file with
//! the rule extension next to it is a rule file.
//!
//! Failures here are local: a broken manifest drops its directory and a broken
//! rule file drops its rules, both with a warning. Only an unreadable root is
//! returned as an error.

use crate::config::WalkerConfig;
use crate::error::{Result, RulesheetError};
use crate::rules::extract_rules;
use crate::types::{Rule, Ruleset, RulesetManifest};
use crate::yaml::{read_document, string_field, untag, RuleDocument};
use anyhow::{bail, Context};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A directory passes when no filters are given, or when its name contains
/// any filter (an exact match is the degenerate case). Case-sensitive.
pub fn matches_filters(dir_name: &str, filters: &[String]) -> bool {
    filters.is_empty()
        || filters
            .iter()
            .any(|filter| dir_name == filter.as_str() || dir_name.contains(filter.as_str()))
}

pub struct RulesetWalker {
    config: WalkerConfig,
}

impl Default for RulesetWalker {
    fn default() -> Self {
        Self::new(WalkerConfig::default())
    }
}

impl RulesetWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Load every qualifying ruleset under `root`, in listing order.
    pub fn walk(&self, root: &Path, filters: &[String]) -> Result<Vec<Ruleset>> {
        if !root.is_dir() {
            return Err(RulesheetError::NotADirectory(root.to_path_buf()));
        }

        let mut rulesets = Vec::new();
        for dir in self.subdirectories(root)? {
            let dir_name = entry_name(&dir);
            if !matches_filters(&dir_name, filters) {
                info!("Skipping directory: {dir_name} (not in filter list)");
                continue;
            }

            match self.load_ruleset(&dir) {
                Ok(Some(ruleset)) => {
                    debug!(
                        "Loaded ruleset '{}' from {dir_name} with {} rules",
                        ruleset.manifest.name,
                        ruleset.rules.len()
                    );
                    rulesets.push(ruleset);
                }
                Ok(None) => debug!("No manifest in {dir_name}, not a ruleset"),
                Err(e) => warn!("Skipping ruleset directory {dir_name}: {e:#}"),
            }
        }

        info!("Found {} rulesets under {}", rulesets.len(), root.display());
        Ok(rulesets)
    }

    /// Load one ruleset directory. `Ok(None)` when it has no manifest.
    pub fn load_ruleset(&self, dir: &Path) -> anyhow::Result<Option<Ruleset>> {
        let manifest_path = dir.join(&self.config.manifest_file_name);
        if !manifest_path.is_file() {
            return Ok(None);
        }

        let manifest = load_manifest(&manifest_path)?;
        let mut ruleset = Ruleset::new(entry_name(dir), manifest);

        for rule_file in self.rule_files(dir)? {
            match load_rule_file(&rule_file) {
                Ok(rules) => {
                    debug!("{}: {} rules", rule_file.display(), rules.len());
                    ruleset.rules.extend(rules);
                }
                Err(e) => warn!("Skipping rule file: {e:#}"),
            }
        }

        Ok(Some(ruleset))
    }

    fn subdirectories(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(root).map_err(|source| RulesheetError::ListDirectory {
            path: root.to_path_buf(),
            source,
        })?;

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!("Unreadable entry in {}: {e}", root.display());
                    None
                }
            })
            .filter(|path| path.is_dir())
            .collect();

        if self.config.sort_entries {
            dirs.sort_by_key(|p| entry_name(p));
        }
        Ok(dirs)
    }

    fn rule_files(&self, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let entries =
            fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let name = entry_name(&path);
            if path.is_file()
                && name.ends_with(&self.config.rule_file_extension)
                && name != self.config.manifest_file_name
            {
                files.push(path);
            }
        }

        if self.config.sort_entries {
            files.sort_by_key(|p| entry_name(p));
        }
        Ok(files)
    }
}

/// Read a manifest. Missing keys and an empty file both give empty strings.
pub fn load_manifest(path: &Path) -> anyhow::Result<RulesetManifest> {
    match untag(read_document(path)?) {
        Value::Mapping(map) => Ok(RulesetManifest {
            name: string_field(&map, "name"),
            description: string_field(&map, "description"),
        }),
        Value::Null => Ok(RulesetManifest::default()),
        _ => bail!("Manifest {} is not a map", path.display()),
    }
}

pub fn load_rule_file(path: &Path) -> anyhow::Result<Vec<Rule>> {
    let document = read_document(path)?;
    Ok(extract_rules(RuleDocument::from(document)))
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
