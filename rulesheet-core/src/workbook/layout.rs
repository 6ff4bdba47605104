use std::collections::HashSet;

/// Row 0 holds the ruleset summary
pub const SUMMARY_ROW: u32 = 0;
/// Row 1 holds the column headers
pub const TITLE_ROW: u32 = 1;
/// Rules start on row 2
pub const FIRST_DATA_ROW: u32 = 2;

pub const SUMMARY_LABEL: &str = "Description";

/// Sheet names longer than this are rejected by spreadsheet applications
pub const MAX_SHEET_NAME_LEN: usize = 31;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub header: &'static str,
    /// Width in the xlsx format's character units
    pub width: f64,
}

/// Data columns, in sheet order
pub const COLUMNS: [ColumnSpec; 7] = [
    ColumnSpec { header: "RuleID", width: 20.0 },
    ColumnSpec { header: "When", width: 50.0 },
    ColumnSpec { header: "Description & Message", width: 100.0 },
    ColumnSpec { header: "Source", width: 20.0 },
    ColumnSpec { header: "Target", width: 20.0 },
    ColumnSpec { header: "Domain", width: 20.0 },
    ColumnSpec { header: "Category", width: 20.0 },
];

pub fn summary_text(name: &str, description: &str) -> String {
    format!("name:{name} Description:{description}")
}

/// Make a name acceptable as a sheet name: forbidden characters become
/// spaces, the result is cut to 31 characters, and a leading or trailing
/// apostrophe becomes a space.
pub fn safe_sheet_name(name: &str) -> String {
    let mut chars: Vec<char> = name
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .map(|c| match c {
            '\0' | '\n' | '\r' | '\t' | '\u{c}' | '/' | '\\' | '?' | '*' | '[' | ']' | ':' => ' ',
            other => other,
        })
        .collect();

    if chars.first() == Some(&'\'') {
        chars[0] = ' ';
    }
    if chars.last() == Some(&'\'') {
        let last = chars.len() - 1;
        chars[last] = ' ';
    }
    chars.into_iter().collect()
}

/// `Sheet<N>` for the N-th sheet (1-based) of a workbook
pub fn synthesized_sheet_name(position: usize) -> String {
    format!("Sheet{position}")
}

/// Hands out sheet names for a workbook being built, in creation order.
///
/// Names that sanitize to nothing become `Sheet<N>`. Names already taken
/// (compared case-insensitively, like spreadsheet applications do) get a
/// ` (2)`, ` (3)`, ... suffix.
#[derive(Debug, Default)]
pub struct SheetNamer {
    taken: HashSet<String>,
}

impl SheetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&mut self, manifest_name: &str) -> String {
        let safe = safe_sheet_name(manifest_name);
        let base = if safe.trim().is_empty() {
            synthesized_sheet_name(self.taken.len() + 1)
        } else {
            safe
        };

        let mut candidate = base.clone();
        let mut counter = 2;
        while self.taken.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({counter})");
            let keep = MAX_SHEET_NAME_LEN - suffix.chars().count();
            candidate = base.chars().take(keep).collect::<String>() + &suffix;
            counter += 1;
        }

        self.taken.insert(candidate.to_lowercase());
        candidate
    }
}
