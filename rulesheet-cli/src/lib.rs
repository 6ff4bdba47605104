// All core functionality is in rulesheet-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod paths;

// Re-export core types for convenience
pub use rulesheet_core::*;
