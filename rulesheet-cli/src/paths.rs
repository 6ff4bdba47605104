use anyhow::{bail, Context, Result};
use std::path::Path;

/// The ruleset root must be an existing directory.
pub fn ensure_ruleset_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!("Ruleset path {} is not a directory", path.display());
    }
    Ok(())
}

/// Create the output directory when missing. Returns true if it was created.
pub fn ensure_output_dir(path: &Path) -> Result<bool> {
    if path.exists() {
        if !path.is_dir() {
            bail!("Output path {} exists but is not a directory", path.display());
        }
        return Ok(false);
    }
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create output directory {}", path.display()))?;
    Ok(true)
}

/// Classification works on an earlier export, so the directory has to be there.
pub fn ensure_existing_output_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!("Output path {} is not an existing directory", path.display());
    }
    Ok(())
}

/// `--filters` values after comma splitting: trimmed, empties dropped
pub fn clean_filters(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|item| item.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
