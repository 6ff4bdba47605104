use serde::{Deserialize, Serialize};

// ===== RULESET TYPES =====
// A ruleset is one directory on disk and one sheet in the workbook.
// Everything here is built by the walker, handed to the workbook builder
// once and then dropped.

/// Metadata read from a ruleset's manifest file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetManifest {
    pub name: String,
    pub description: String,
}

/// One normalized rule, ready to become a sheet row.
///
/// Label facets hold every matching label value joined by `", "`, or an empty
/// string when no label matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub rule_id: String,
    pub when: String,
    pub merged_description: String,
    pub source: String,
    pub target: String,
    pub domain: String,
    pub category: String,
}

impl Rule {
    /// Cell values in sheet column order
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.rule_id,
            &self.when,
            &self.merged_description,
            &self.source,
            &self.target,
            &self.domain,
            &self.category,
        ]
    }
}

/// A manifest plus its rules in discovery order (file order, then in-file order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Directory name the ruleset was loaded from
    pub directory: String,
    pub manifest: RulesetManifest,
    pub rules: Vec<Rule>,
}

impl Ruleset {
    pub fn new(directory: impl Into<String>, manifest: RulesetManifest) -> Self {
        Self {
            directory: directory.into(),
            manifest,
            rules: Vec::new(),
        }
    }
}

// ===== SUMMARY TYPES =====

/// What `export` wrote: one entry per sheet, in workbook order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportSummary {
    pub workbook_path: std::path::PathBuf,
    pub sheets: Vec<SheetSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub rules: usize,
}

impl ExportSummary {
    pub fn total_rules(&self) -> usize {
        self.sheets.iter().map(|s| s.rules).sum()
    }
}

/// Per-sheet outcome of a classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetClassification {
    pub name: String,
    /// 0-based column index holding the classification
    pub column: u32,
    /// false when an existing column was overwritten in place
    pub column_added: bool,
    pub yes: usize,
    pub no: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassificationSummary {
    pub workbook_path: std::path::PathBuf,
    pub sheets: Vec<SheetClassification>,
}

impl ClassificationSummary {
    pub fn total_yes(&self) -> usize {
        self.sheets.iter().map(|s| s.yes).sum()
    }

    pub fn total_no(&self) -> usize {
        self.sheets.iter().map(|s| s.no).sum()
    }
}
