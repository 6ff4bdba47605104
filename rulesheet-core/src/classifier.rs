use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::types::{ClassificationSummary, SheetClassification};
use crate::workbook::xlsx;
use crate::workbook::{FIRST_DATA_ROW, TITLE_ROW};
use std::path::Path;
use tracing::{debug, info};
use umya_spreadsheet::{Spreadsheet, Worksheet};

pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// Flags sheet rows that are specific to one framework (Spring by default).
///
/// A row is specific when any of its cells mentions a keyword, or when its
/// `When` cell carries one of the configured markers. Matching is on
/// lowercased text.
pub struct SpecificityClassifier {
    column_header: String,
    when_header: String,
    keywords: Vec<String>,
    when_markers: Vec<String>,
}

impl Default for SpecificityClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

fn lowered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

fn header_matches(cell: Option<&str>, header: &str) -> bool {
    cell.is_some_and(|text| text.trim().to_lowercase() == header.trim().to_lowercase())
}

impl SpecificityClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            column_header: config.column_header.clone(),
            when_header: config.when_header.clone(),
            keywords: lowered(&config.keywords),
            when_markers: lowered(&config.when_markers),
        }
    }

    /// Classify one row. `when_col` is the index of the condition column, if
    /// the sheet has one.
    pub fn is_specific(&self, cells: &[Option<String>], when_col: Option<usize>) -> bool {
        let keyword_hit = cells.iter().flatten().any(|text| {
            let lower = text.to_lowercase();
            self.keywords.iter().any(|k| lower.contains(k.as_str()))
        });
        if keyword_hit {
            return true;
        }

        when_col
            .and_then(|col| cells.get(col))
            .and_then(|cell| cell.as_deref())
            .is_some_and(|text| {
                let lower = text.to_lowercase();
                self.when_markers.iter().any(|m| lower.contains(m.as_str()))
            })
    }

    /// Locate or append the classification column, then (re)classify every
    /// data row. Sheets without a title row are left alone.
    pub fn classify_sheet(&self, sheet: &mut Worksheet) -> Option<SheetClassification> {
        let name = sheet.get_name().to_string();
        let title_len = xlsx::row_len(sheet, TITLE_ROW);
        if title_len == 0 {
            debug!("Sheet '{name}' has no title row, skipping");
            return None;
        }

        let title = xlsx::row_cells(sheet, TITLE_ROW, title_len);
        let existing = title
            .iter()
            .position(|cell| header_matches(cell.as_deref(), &self.column_header));
        let when_col = title
            .iter()
            .position(|cell| header_matches(cell.as_deref(), &self.when_header));

        let (column, column_added) = match existing {
            Some(col) => (col as u32, false),
            None => {
                xlsx::set_cell_text(sheet, TITLE_ROW, title_len, &self.column_header);
                (title_len, true)
            }
        };

        let mut result = SheetClassification {
            name,
            column,
            column_added,
            yes: 0,
            no: 0,
        };

        let width = xlsx::column_count(sheet);
        for row in FIRST_DATA_ROW..xlsx::row_count(sheet) {
            let mut cells = xlsx::row_cells(sheet, row, width);
            if cells.iter().all(Option::is_none) {
                continue;
            }
            // A previous verdict is not evidence; anything else typed there is
            if let Some(cell) = cells.get_mut(column as usize) {
                if matches!(cell.as_deref(), Some(YES | NO)) {
                    *cell = None;
                }
            }

            let verdict = if self.is_specific(&cells, when_col) {
                result.yes += 1;
                YES
            } else {
                result.no += 1;
                NO
            };
            xlsx::set_cell_text(sheet, row, column, verdict);
        }

        xlsx::autosize_column(sheet, column);
        debug!(
            "Sheet '{}': {} specific, {} not",
            result.name, result.yes, result.no
        );
        Some(result)
    }

    pub fn classify_workbook(&self, book: &mut Spreadsheet) -> Vec<SheetClassification> {
        book.get_sheet_collection_mut()
            .iter_mut()
            .filter_map(|sheet| self.classify_sheet(sheet))
            .collect()
    }

    /// Reopen a workbook, classify every sheet and save it back in place.
    /// Nothing on disk changes unless the final save succeeds.
    pub fn classify_file(&self, path: &Path) -> Result<ClassificationSummary> {
        let mut book = xlsx::open(path)?;
        let sheets = self.classify_workbook(&mut book);
        xlsx::save(&book, path)?;

        let summary = ClassificationSummary {
            workbook_path: path.to_path_buf(),
            sheets,
        };
        info!(
            "Classified {} rows in {}: {} specific",
            summary.total_yes() + summary.total_no(),
            path.display(),
            summary.total_yes()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::xlsx::{cell_text, set_cell_text};

    fn row(cells: &[&str]) -> Vec<Option<String>> {
        cells.iter().map(|c| Some(c.to_string())).collect()
    }

    /// Sheet with the standard title row and the given data rows
    fn sheet(rows: &[&[&str]]) -> Spreadsheet {
        let mut book = xlsx::new_workbook();
        let sheet = book.new_sheet("rules").unwrap();
        set_cell_text(sheet, 0, 0, "Description");
        for (col, header) in ["RuleID", "When", "Description & Message"].iter().enumerate() {
            set_cell_text(sheet, 1, col as u32, header);
        }
        for (i, cells) in rows.iter().enumerate() {
            for (col, text) in cells.iter().enumerate() {
                set_cell_text(sheet, 2 + i as u32, col as u32, text);
            }
        }
        book
    }

    #[test]
    fn keyword_anywhere_in_row_is_specific() {
        let classifier = SpecificityClassifier::default();
        assert!(classifier.is_specific(&row(&["id", "", "Uses Spring Boot"]), Some(1)));
        assert!(classifier.is_specific(&row(&["SPRING-001", "", ""]), Some(1)));
    }

    #[test]
    fn properties_marker_only_counts_in_when_column() {
        let classifier = SpecificityClassifier::default();
        let hit = row(&["id", "filePattern: application.properties|yaml", "msg"]);
        assert!(classifier.is_specific(&hit, Some(1)));

        let elsewhere = row(&["id", "java.referenced", "see *.properties|x"]);
        assert!(!classifier.is_specific(&elsewhere, Some(1)));
        assert!(!classifier.is_specific(&hit, None));
    }

    #[test]
    fn plain_row_is_not_specific() {
        let classifier = SpecificityClassifier::default();
        assert!(!classifier.is_specific(&row(&["id", "java.referenced", "EJB"]), Some(1)));
        assert!(!classifier.is_specific(&[None, None], Some(1)));
    }

    #[test]
    fn new_column_is_appended_after_title_row() {
        let mut book = sheet(&[&["r1", "x", "spring thing"], &["r2", "y", "ejb"]]);
        let sheet = book.get_sheet_by_name_mut("rules").unwrap();
        let result = SpecificityClassifier::default().classify_sheet(sheet).unwrap();

        assert_eq!(result.column, 3);
        assert!(result.column_added);
        assert_eq!((result.yes, result.no), (1, 1));
        assert_eq!(cell_text(sheet, 1, 3).as_deref(), Some("spring specific?"));
        assert_eq!(cell_text(sheet, 2, 3).as_deref(), Some("Yes"));
        assert_eq!(cell_text(sheet, 3, 3).as_deref(), Some("No"));
    }

    #[test]
    fn existing_column_is_overwritten_in_place() {
        let mut book = sheet(&[&["r1", "x", "ejb"]]);
        let sheet = book.get_sheet_by_name_mut("rules").unwrap();
        set_cell_text(sheet, 1, 3, "  Spring Specific?  ");
        set_cell_text(sheet, 2, 3, "Yes");

        let result = SpecificityClassifier::default().classify_sheet(sheet).unwrap();
        assert_eq!(result.column, 3);
        assert!(!result.column_added);
        assert_eq!(cell_text(sheet, 2, 3).as_deref(), Some("No"));
        assert_eq!(cell_text(sheet, 1, 4), None);
    }

    #[test]
    fn text_in_classification_column_counts() {
        let mut book = sheet(&[&["r1", "x", "ejb"], &["r2", "y", "ejb"]]);
        let sheet = book.get_sheet_by_name_mut("rules").unwrap();
        set_cell_text(sheet, 1, 3, "spring specific?");
        set_cell_text(sheet, 2, 3, "see spring note");
        set_cell_text(sheet, 3, 3, "Yes");

        let result = SpecificityClassifier::default().classify_sheet(sheet).unwrap();
        assert_eq!((result.yes, result.no), (1, 1));
        assert_eq!(cell_text(sheet, 2, 3).as_deref(), Some("Yes"));
        assert_eq!(cell_text(sheet, 3, 3).as_deref(), Some("No"));
    }

    #[test]
    fn previous_verdicts_do_not_match_keywords() {
        let config = ClassifierConfig {
            keywords: vec!["yes".to_string()],
            ..ClassifierConfig::default()
        };
        let classifier = SpecificityClassifier::new(&config);
        let mut book = sheet(&[&["r1", "x", "ejb"]]);
        let sheet = book.get_sheet_by_name_mut("rules").unwrap();

        classifier.classify_sheet(sheet).unwrap();
        classifier.classify_sheet(sheet).unwrap();
        assert_eq!(cell_text(sheet, 2, 3).as_deref(), Some("No"));
    }

    #[test]
    fn gaps_between_rows_are_skipped() {
        let mut book = sheet(&[&["r1", "", ""]]);
        let sheet = book.get_sheet_by_name_mut("rules").unwrap();
        set_cell_text(sheet, 5, 0, "r5 spring");

        let result = SpecificityClassifier::default().classify_sheet(sheet).unwrap();
        assert_eq!((result.yes, result.no), (1, 1));
        assert_eq!(cell_text(sheet, 3, 3), None);
        assert_eq!(cell_text(sheet, 5, 3).as_deref(), Some("Yes"));
    }

    #[test]
    fn sheet_without_title_row_is_untouched() {
        let mut book = xlsx::new_workbook();
        let sheet = book.new_sheet("bare").unwrap();
        set_cell_text(sheet, 0, 0, "only a summary");
        assert!(SpecificityClassifier::default().classify_sheet(sheet).is_none());
        assert_eq!(xlsx::column_count(sheet), 1);
    }

    #[test]
    fn custom_keywords_replace_spring() {
        let config = ClassifierConfig {
            column_header: "quarkus specific?".to_string(),
            keywords: vec!["Quarkus".to_string(), String::new()],
            ..ClassifierConfig::default()
        };
        let classifier = SpecificityClassifier::new(&config);
        assert!(classifier.is_specific(&row(&["io.quarkus"]), None));
        assert!(!classifier.is_specific(&row(&["spring"]), None));
    }
}
