// ARENA Project Ledger - Core Library
// Exposes all modules for use in the CLI, the TUI, and tests

pub mod catalog;
pub mod codec;
pub mod error;
pub mod record;
pub mod report;
pub mod validate;

// Re-export commonly used types
pub use catalog::{Catalog, LoadSource, JSON_FILE, TEXT_FILE};
pub use error::{LedgerError, Result};
pub use record::{
    dollars_to_money, money_to_dollars, money_to_millions, parse_period, period_start_year,
    split_period, Project, ProjectKind,
};
pub use report::{
    category_summary, funding_by_year, state_summary, write_csv, write_json_lines,
};
pub use validate::{
    validate_money, validate_period, validate_project, validate_required, validate_state,
    ValidationResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
