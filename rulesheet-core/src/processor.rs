use crate::classifier::SpecificityClassifier;
use crate::config::RulesheetConfig;
use crate::error::Result;
use crate::types::*;
use crate::walker::RulesetWalker;
use crate::workbook::WorkbookBuilder;
use std::path::{Path, PathBuf};

/// Wires walker, workbook builder and classifier together behind the two
/// caller-facing operations.
pub struct RulesheetProcessor {
    output_file_name: String,
    walker: RulesetWalker,
    builder: WorkbookBuilder,
    classifier: SpecificityClassifier,
}

impl Default for RulesheetProcessor {
    fn default() -> Self {
        Self::new(RulesheetConfig::default())
    }
}

impl RulesheetProcessor {
    pub fn new(config: RulesheetConfig) -> Self {
        Self {
            output_file_name: config.workbook.output_file_name.clone(),
            classifier: SpecificityClassifier::new(&config.classifier),
            walker: RulesetWalker::new(config.walker),
            builder: WorkbookBuilder::new(config.workbook),
        }
    }

    /// Where the workbook lives inside an output directory
    pub fn workbook_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.output_file_name)
    }

    /// Walk the ruleset root and extract rulesets without writing anything.
    pub fn extract(&self, ruleset_root: &Path, filters: Option<&[String]>) -> Result<Vec<Ruleset>> {
        self.walker.walk(ruleset_root, filters.unwrap_or_default())
    }

    /// Write already extracted rulesets to the workbook in `output_dir`.
    pub fn export_rulesets(&self, rulesets: &[Ruleset], output_dir: &Path) -> Result<ExportSummary> {
        let workbook_path = self.workbook_path(output_dir);
        let sheets = self.builder.write(rulesets, &workbook_path)?;
        Ok(ExportSummary {
            workbook_path,
            sheets,
        })
    }

    /// Rulesets under `ruleset_root` -> `<output_dir>/<workbook>`
    pub fn export(
        &self,
        ruleset_root: &Path,
        output_dir: &Path,
        filters: Option<&[String]>,
    ) -> Result<ExportSummary> {
        let rulesets = self.extract(ruleset_root, filters)?;
        self.export_rulesets(&rulesets, output_dir)
    }

    /// Classify the workbook in `output_dir` in place.
    pub fn classify(&self, output_dir: &Path) -> Result<ClassificationSummary> {
        self.classifier.classify_file(&self.workbook_path(output_dir))
    }
}

/// Export with the default configuration
pub fn export(
    ruleset_root: &Path,
    output_dir: &Path,
    filters: Option<&[String]>,
) -> Result<ExportSummary> {
    RulesheetProcessor::default().export(ruleset_root, output_dir, filters)
}

/// Classify with the default configuration
pub fn classify(output_dir: &Path) -> Result<ClassificationSummary> {
    RulesheetProcessor::default().classify(output_dir)
}
