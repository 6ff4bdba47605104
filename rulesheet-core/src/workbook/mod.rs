//! Workbook assembly
//!
//! ```text
//! Vec<Ruleset>
//!     ↓
//! [WorkbookBuilder]  one sheet per ruleset, fixed layout (layout.rs)
//!     ↓
//! Spreadsheet  →  xlsx file (xlsx.rs)
//! ```

pub mod builder;
pub mod layout;
pub mod xlsx;

pub use builder::WorkbookBuilder;
pub use layout::{SheetNamer, COLUMNS, FIRST_DATA_ROW, SUMMARY_ROW, TITLE_ROW};
