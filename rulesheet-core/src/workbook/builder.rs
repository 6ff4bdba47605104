use super::layout::{
    summary_text, SheetNamer, COLUMNS, FIRST_DATA_ROW, SUMMARY_LABEL, SUMMARY_ROW, TITLE_ROW,
};
use super::xlsx;
use crate::config::WorkbookConfig;
use crate::error::{Result, RulesheetError};
use crate::types::{Ruleset, SheetSummary};
use std::path::Path;
use tracing::{debug, info};
use umya_spreadsheet::{Spreadsheet, Worksheet};

pub struct WorkbookBuilder {
    config: WorkbookConfig,
}

impl Default for WorkbookBuilder {
    fn default() -> Self {
        Self::new(WorkbookConfig::default())
    }
}

impl WorkbookBuilder {
    pub fn new(config: WorkbookConfig) -> Self {
        Self { config }
    }

    /// Build an in-memory workbook with one sheet per ruleset, in order.
    pub fn build(&self, rulesets: &[Ruleset]) -> Result<(Spreadsheet, Vec<SheetSummary>)> {
        let mut book = xlsx::new_workbook();
        let mut namer = SheetNamer::new();
        let mut sheets = Vec::with_capacity(rulesets.len());

        for ruleset in rulesets {
            let sheet_name = namer.next_name(&ruleset.manifest.name);
            let sheet = book
                .new_sheet(sheet_name.clone())
                .map_err(|reason| RulesheetError::CreateSheet {
                    name: sheet_name.clone(),
                    reason: reason.to_string(),
                })?;
            self.fill_sheet(sheet, &sheet_name, ruleset);

            debug!("Sheet '{sheet_name}': {} rules", ruleset.rules.len());
            sheets.push(SheetSummary {
                name: sheet_name,
                rules: ruleset.rules.len(),
            });
        }

        Ok((book, sheets))
    }

    /// Replace whatever is at `path` with a freshly built workbook. The
    /// previous file stays in place until the new one is fully written.
    pub fn write(&self, rulesets: &[Ruleset], path: &Path) -> Result<Vec<SheetSummary>> {
        let (book, sheets) = self.build(rulesets)?;
        xlsx::save(&book, path)?;
        info!("Wrote {} sheets to {}", sheets.len(), path.display());
        Ok(sheets)
    }

    fn fill_sheet(&self, sheet: &mut Worksheet, sheet_name: &str, ruleset: &Ruleset) {
        // An unnamed ruleset is described by the sheet name it was given
        let display_name = if ruleset.manifest.name.is_empty() {
            sheet_name
        } else {
            ruleset.manifest.name.as_str()
        };

        xlsx::set_cell_text(sheet, SUMMARY_ROW, 0, SUMMARY_LABEL);
        xlsx::set_cell_text(
            sheet,
            SUMMARY_ROW,
            1,
            &summary_text(display_name, &ruleset.manifest.description),
        );

        for (col, column) in COLUMNS.iter().enumerate() {
            xlsx::set_cell_text(sheet, TITLE_ROW, col as u32, column.header);
        }

        let mut row = FIRST_DATA_ROW;
        for rule in &ruleset.rules {
            for (col, value) in rule.cells().iter().enumerate() {
                xlsx::set_cell_text(sheet, row, col as u32, value);
            }
            row += 1;
        }

        for (col, column) in COLUMNS.iter().enumerate() {
            xlsx::set_column_width(sheet, col as u32, column.width);
        }

        if self.config.wrap_text {
            for r in SUMMARY_ROW..row {
                for col in 0..COLUMNS.len() as u32 {
                    xlsx::wrap_cell(sheet, r, col);
                }
            }
        }
    }
}
