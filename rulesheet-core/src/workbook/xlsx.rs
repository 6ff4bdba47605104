// Thin layer over umya-spreadsheet.
//
// Everything above this file addresses cells as 0-based (row, col). umya uses
// 1-based (col, row) coordinates; the conversion happens here and nowhere else.

use crate::error::{Result, RulesheetError};
use std::path::Path;
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Widest column the xlsx format accepts, in character units
pub const MAX_COLUMN_WIDTH: f64 = 255.0;

/// A workbook with no sheets at all
pub fn new_workbook() -> Spreadsheet {
    umya_spreadsheet::new_file_empty_worksheet()
}

pub fn open(path: &Path) -> Result<Spreadsheet> {
    if !path.is_file() {
        return Err(RulesheetError::MissingWorkbook(path.to_path_buf()));
    }
    umya_spreadsheet::reader::xlsx::read(path).map_err(|e| RulesheetError::ReadWorkbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Persist the workbook. umya writes to a sibling temp file and renames it
/// over `path`, so a failed save leaves the previous file untouched.
pub fn save(book: &Spreadsheet, path: &Path) -> Result<()> {
    // umya derives the temp file name from the extension
    if path.extension().and_then(|e| e.to_str()).is_none() {
        return Err(RulesheetError::WriteWorkbook {
            path: path.to_path_buf(),
            message: "workbook file name needs an extension".to_string(),
        });
    }
    umya_spreadsheet::writer::xlsx::write(book, path).map_err(|e| RulesheetError::WriteWorkbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn coordinate(row: u32, col: u32) -> (u32, u32) {
    (col + 1, row + 1)
}

pub fn cell_text(sheet: &Worksheet, row: u32, col: u32) -> Option<String> {
    sheet
        .get_cell(coordinate(row, col))
        .map(|cell| cell.get_value().to_string())
}

/// Store `text` as a string cell, creating the cell if needed.
pub fn set_cell_text(sheet: &mut Worksheet, row: u32, col: u32, text: &str) {
    sheet
        .get_cell_mut(coordinate(row, col))
        .set_value_string(text);
}

/// Turn on word wrap for an existing cell. Absent cells stay absent.
pub fn wrap_cell(sheet: &mut Worksheet, row: u32, col: u32) {
    if sheet.get_cell(coordinate(row, col)).is_none() {
        return;
    }
    sheet
        .get_cell_mut(coordinate(row, col))
        .get_style_mut()
        .get_alignment_mut()
        .set_wrap_text(true);
}

/// Number of rows up to and including the last populated one
pub fn row_count(sheet: &Worksheet) -> u32 {
    sheet.get_highest_row()
}

/// Number of columns up to and including the last populated one
pub fn column_count(sheet: &Worksheet) -> u32 {
    sheet.get_highest_column()
}

/// Cells of one row, `None` where no cell exists, padded to `width`.
pub fn row_cells(sheet: &Worksheet, row: u32, width: u32) -> Vec<Option<String>> {
    (0..width).map(|col| cell_text(sheet, row, col)).collect()
}

/// Length of a row up to and including its last existing cell, 0 when the
/// row has no cells.
pub fn row_len(sheet: &Worksheet, row: u32) -> u32 {
    (0..column_count(sheet))
        .rev()
        .find(|col| sheet.get_cell(coordinate(row, *col)).is_some())
        .map_or(0, |col| col + 1)
}

/// Whether an existing cell has word wrap turned on
pub fn is_wrapped(sheet: &Worksheet, row: u32, col: u32) -> bool {
    sheet
        .get_cell(coordinate(row, col))
        .and_then(|cell| cell.get_style().get_alignment())
        .is_some_and(|alignment| *alignment.get_wrap_text())
}

/// Explicit width of a column, `None` when it was never set
pub fn column_width(sheet: &Worksheet, col: u32) -> Option<f64> {
    sheet
        .get_column_dimension_by_number(&(col + 1))
        .map(|column| *column.get_width())
}

pub fn set_column_width(sheet: &mut Worksheet, col: u32, width: f64) {
    sheet
        .get_column_dimension_by_number_mut(&(col + 1))
        .set_width(width.min(MAX_COLUMN_WIDTH));
}

/// Fit a column to its longest line of text.
pub fn autosize_column(sheet: &mut Worksheet, col: u32) -> f64 {
    let longest = (0..row_count(sheet))
        .filter_map(|row| cell_text(sheet, row, col))
        .flat_map(|text| {
            text.lines()
                .map(|line| line.chars().count())
                .collect::<Vec<_>>()
        })
        .max()
        .unwrap_or(0);
    let width = (longest as f64 + 2.0).clamp(8.0, MAX_COLUMN_WIDTH);
    set_column_width(sheet, col, width);
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with(cells: &[(u32, u32, &str)]) -> Spreadsheet {
        let mut book = new_workbook();
        let sheet = book.new_sheet("t").unwrap();
        for (row, col, text) in cells {
            set_cell_text(sheet, *row, *col, text);
        }
        book
    }

    #[test]
    fn zero_based_addressing_round_trips() {
        let book = sheet_with(&[(0, 0, "a1"), (2, 3, "d3")]);
        let sheet = book.get_sheet_by_name("t").unwrap();
        assert_eq!(cell_text(sheet, 0, 0).as_deref(), Some("a1"));
        assert_eq!(cell_text(sheet, 2, 3).as_deref(), Some("d3"));
        assert_eq!(cell_text(sheet, 1, 1), None);
        assert_eq!(row_count(sheet), 3);
        assert_eq!(column_count(sheet), 4);
    }

    #[test]
    fn numeric_looking_text_stays_text() {
        let book = sheet_with(&[(0, 0, "00123")]);
        let sheet = book.get_sheet_by_name("t").unwrap();
        assert_eq!(cell_text(sheet, 0, 0).as_deref(), Some("00123"));
    }

    #[test]
    fn row_len_stops_at_last_cell() {
        let book = sheet_with(&[(0, 0, "x"), (0, 4, "y"), (1, 1, "z")]);
        let sheet = book.get_sheet_by_name("t").unwrap();
        assert_eq!(row_len(sheet, 0), 5);
        assert_eq!(row_len(sheet, 1), 2);
        assert_eq!(row_len(sheet, 7), 0);
    }

    #[test]
    fn row_cells_pads_missing_cells() {
        let book = sheet_with(&[(0, 1, "b")]);
        let sheet = book.get_sheet_by_name("t").unwrap();
        assert_eq!(row_cells(sheet, 0, 3), vec![None, Some("b".to_string()), None]);
    }

    #[test]
    fn autosize_uses_longest_line() {
        let mut book = sheet_with(&[(0, 0, "short"), (1, 0, "a\nmuch longer line")]);
        let sheet = book.get_sheet_by_name_mut("t").unwrap();
        assert_eq!(autosize_column(sheet, 0), 18.0);
        assert_eq!(autosize_column(sheet, 5), 8.0);
    }

    #[test]
    fn wrap_and_width_read_back() {
        let mut book = sheet_with(&[(0, 0, "a"), (0, 1, "b")]);
        let sheet = book.get_sheet_by_name_mut("t").unwrap();
        wrap_cell(sheet, 0, 0);
        wrap_cell(sheet, 3, 3);
        set_column_width(sheet, 1, 300.0);

        assert!(is_wrapped(sheet, 0, 0));
        assert!(!is_wrapped(sheet, 0, 1));
        assert_eq!(cell_text(sheet, 3, 3), None);
        assert_eq!(column_width(sheet, 1), Some(MAX_COLUMN_WIDTH));
        assert_eq!(column_width(sheet, 4), None);
    }

    #[test]
    fn save_without_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workbook");
        let err = save(&new_workbook(), &path).unwrap_err();
        assert!(matches!(err, RulesheetError::WriteWorkbook { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn open_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = open(&dir.path().join("nope.xlsx")).unwrap_err();
        assert!(matches!(err, RulesheetError::MissingWorkbook(_)));
    }
}
