use std::path::PathBuf;

/// Result type for workbook-level operations
pub type Result<T> = std::result::Result<T, RulesheetError>;

/// Failures that abort a whole export or classification pass.
///
/// Problems with a single ruleset directory or rule file never surface here;
/// the walker logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum RulesheetError {
    #[error("ruleset root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to list {}: {source}", path.display())]
    ListDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write workbook {}: {message}", path.display())]
    WriteWorkbook { path: PathBuf, message: String },

    #[error("failed to read workbook {}: {message}", path.display())]
    ReadWorkbook { path: PathBuf, message: String },

    #[error("workbook not found: {}", .0.display())]
    MissingWorkbook(PathBuf),

    #[error("could not create sheet '{name}': {reason}")]
    CreateSheet { name: String, reason: String },
}
