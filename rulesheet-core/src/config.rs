use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_manifest_file_name() -> String {
    "ruleset.yaml".to_string()
}

fn default_rule_file_extension() -> String {
    ".yaml".to_string()
}

fn default_output_file_name() -> String {
    "appcat-ruleset.xlsx".to_string()
}

fn default_column_header() -> String {
    "spring specific?".to_string()
}

fn default_keywords() -> Vec<String> {
    vec!["spring".to_string()]
}

fn default_when_header() -> String {
    "when".to_string()
}

fn default_when_markers() -> Vec<String> {
    vec!["properties|".to_string()]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesheetConfig {
    /// Where rulesets live on disk and how they are recognized
    #[serde(default)]
    pub walker: WalkerConfig,
    /// Output workbook settings
    #[serde(default)]
    pub workbook: WorkbookConfig,
    /// Framework-specificity classification settings
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// File that marks a directory as a ruleset
    #[serde(default = "default_manifest_file_name")]
    pub manifest_file_name: String,
    /// Suffix every rule file carries
    #[serde(default = "default_rule_file_extension")]
    pub rule_file_extension: String,
    /// Sort directories and rule files by name so output doesn't depend on
    /// filesystem listing order
    #[serde(default = "default_true")]
    pub sort_entries: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            manifest_file_name: default_manifest_file_name(),
            rule_file_extension: default_rule_file_extension(),
            sort_entries: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookConfig {
    /// File name of the workbook inside the output directory
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,
    /// Apply word wrap to every populated cell
    #[serde(default = "default_true")]
    pub wrap_text: bool,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            output_file_name: default_output_file_name(),
            wrap_text: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Title-row text of the classification column (matched trimmed, case-insensitive)
    #[serde(default = "default_column_header")]
    pub column_header: String,
    /// Any cell containing one of these (lowercased) flags the row
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Title-row text of the condition column
    #[serde(default = "default_when_header")]
    pub when_header: String,
    /// Markers that flag a row when found in its condition cell
    #[serde(default = "default_when_markers")]
    pub when_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            column_header: default_column_header(),
            keywords: default_keywords(),
            when_header: default_when_header(),
            when_markers: default_when_markers(),
        }
    }
}

impl RulesheetConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {path}"))?;
        let config: RulesheetConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {path}"))?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::warn!("{e:#}, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_conventional_layout() {
        let config = RulesheetConfig::default();
        assert_eq!(config.walker.manifest_file_name, "ruleset.yaml");
        assert_eq!(config.walker.rule_file_extension, ".yaml");
        assert!(config.walker.sort_entries);
        assert_eq!(config.workbook.output_file_name, "appcat-ruleset.xlsx");
        assert_eq!(config.classifier.column_header, "spring specific?");
        assert_eq!(config.classifier.keywords, vec!["spring"]);
        assert_eq!(config.classifier.when_markers, vec!["properties|"]);
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let config: RulesheetConfig = serde_yaml::from_str(
            "walker:\n  sort_entries: false\nclassifier:\n  keywords: [quarkus]\n",
        )
        .unwrap();
        assert!(!config.walker.sort_entries);
        assert_eq!(config.walker.manifest_file_name, "ruleset.yaml");
        assert_eq!(config.classifier.keywords, vec!["quarkus"]);
        assert_eq!(config.classifier.when_header, "when");
        assert!(config.workbook.wrap_text);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = RulesheetConfig::load_with_fallback(Some("/definitely/not/here.yaml"));
        assert_eq!(config.workbook.output_file_name, "appcat-ruleset.xlsx");
    }
}
