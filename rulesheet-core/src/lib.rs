// Rulesheet Core Library
//
// Turns a directory of migration rulesets into a sheet-per-ruleset workbook
// and flags framework-specific rules in that workbook afterwards.

pub mod types;
pub mod error;
pub mod config;
pub mod yaml;
pub mod rules;
pub mod walker;
pub mod workbook;
pub mod classifier;
pub mod processor;

// Re-export main types and functions for easy use
pub use types::*;
pub use error::{Result, RulesheetError};
pub use config::RulesheetConfig;
pub use classifier::SpecificityClassifier;
pub use processor::{classify, export, RulesheetProcessor};
pub use walker::RulesetWalker;
pub use workbook::WorkbookBuilder;
