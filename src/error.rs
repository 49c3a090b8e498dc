// ⚠️ Error taxonomy - one enum for everything the library can refuse to do
//
// Callers need to tell a bad replace index apart from a broken data file,
// so these are typed variants rather than stringly anyhow contexts.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Structured decode found a record without one of the seven
    /// mandatory keys. The whole load aborts; no partial catalog.
    #[error("record {index} is missing mandatory field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// The structured document itself is unusable (not JSON, not an
    /// array, or a mandatory value with the wrong type).
    #[error("invalid project data: {message}")]
    Decode { message: String },

    /// replace() with an index past the end of the catalog.
    #[error("project index {index} is out of range (catalog holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A field value rejected by the input patterns.
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// File could not be read or written; keeps the path and the cause.
    #[error("file error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LedgerError {
    pub fn decode(message: impl Into<String>) -> Self {
        LedgerError::Decode {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LedgerError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

// Helper conversions
impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode {
            message: e.to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_missing_field() {
        let err = LedgerError::MissingField {
            index: 2,
            field: "Funding",
        };
        let text = err.to_string();
        assert!(text.contains("Funding"));
        assert!(text.contains('2'));
    }

    #[test]
    fn test_index_error_reports_bounds() {
        let err = LedgerError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(
            err.to_string(),
            "project index 5 is out of range (catalog holds 3)"
        );
    }

    #[test]
    fn test_io_error_keeps_the_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = LedgerError::io("/tmp/ARENA_projects.JSON", cause);
        assert!(err.to_string().contains("ARENA_projects.JSON"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
