// 🛡️ Input validation - field patterns for user-entered project data
//
// Records decoded from legacy files bypass these checks on purpose; only
// the entry paths (add/edit) run them, so the catalog can still hold old
// data that predates the patterns.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{LedgerError, Result};
use crate::record::{parse_period, Project};

lazy_static! {
    /// Australian state names: letters and spaces, nothing else.
    static ref STATE_PATTERN: Regex = Regex::new(r"^[A-Za-z ]+$").unwrap();

    /// Money in millions with exactly two decimals, e.g. "$2.25m".
    static ref MONEY_PATTERN: Regex = Regex::new(r"^\$\d+\.\d{2}m$").unwrap();

    /// "DD/MM/YYYY – DD/MM/YYYY", en dash or hyphen between the dates.
    static ref PERIOD_PATTERN: Regex =
        Regex::new(r"^\d{2}/\d{2}/\d{4}\s[–-]\s\d{2}/\d{2}/\d{4}$").unwrap();
}

/// All field failures for one record; empty vec never occurs (that is `Ok`).
pub type ValidationResult = std::result::Result<(), Vec<LedgerError>>;

// ============================================================================
// FIELD VALIDATORS
// ============================================================================

pub fn validate_required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::Validation {
            field,
            message: "value cannot be empty".to_string(),
        });
    }
    Ok(())
}

pub fn validate_state(value: &str) -> Result<()> {
    if !STATE_PATTERN.is_match(value) {
        return Err(LedgerError::Validation {
            field: "state",
            message: format!("\"{}\" may only contain letters and spaces", value),
        });
    }
    Ok(())
}

/// Shared by funding and total cost; `field` names which one failed.
pub fn validate_money(field: &'static str, value: &str) -> Result<()> {
    if !MONEY_PATTERN.is_match(value) {
        return Err(LedgerError::Validation {
            field,
            message: format!("\"{}\" must look like $X.XXm", value),
        });
    }
    Ok(())
}

pub fn validate_period(value: &str) -> Result<()> {
    if !PERIOD_PATTERN.is_match(value) {
        return Err(LedgerError::Validation {
            field: "period",
            message: format!("\"{}\" must look like DD/MM/YYYY – DD/MM/YYYY", value),
        });
    }
    let Some((start, end)) = parse_period(value) else {
        return Err(LedgerError::Validation {
            field: "period",
            message: format!("\"{}\" contains an impossible calendar date", value),
        });
    };
    if start > end {
        return Err(LedgerError::Validation {
            field: "period",
            message: format!("start date {} is after end date {}", start, end),
        });
    }
    Ok(())
}

// ============================================================================
// RECORD VALIDATOR
// ============================================================================

/// Run every field check and collect all failures, so an entry form can
/// report everything wrong at once. CO2 output is free text and not checked.
pub fn validate_project(project: &Project) -> ValidationResult {
    let mut errors = Vec::new();

    let checks = [
        validate_required("name", &project.name),
        validate_required("category", &project.category),
        validate_required("location", &project.location),
        validate_state(&project.state),
        validate_money("funding", &project.funding),
        validate_money("total cost", &project.total_cost),
        validate_period(&project.period),
    ];
    for check in checks {
        if let Err(error) = check {
            errors.push(error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_project() -> Project {
        Project::new(
            "Solar Demo".to_string(),
            "Solar".to_string(),
            "New South Wales".to_string(),
            "Sydney, NSW".to_string(),
            "$2.25m".to_string(),
            "$5.55m".to_string(),
            "01/01/2023 – 31/12/2024".to_string(),
        )
    }

    #[test]
    fn test_state_accepts_letters_and_spaces() {
        assert!(validate_state("New South Wales").is_ok());
        assert!(validate_state("Victoria").is_ok());
    }

    #[test]
    fn test_state_rejects_digits_and_punctuation() {
        assert!(validate_state("NSW2").is_err());
        assert!(validate_state("Vic.").is_err());
        assert!(validate_state("").is_err());
    }

    #[test]
    fn test_money_accepts_canonical_form() {
        assert!(validate_money("funding", "$2.25m").is_ok());
        assert!(validate_money("funding", "$120.00m").is_ok());
    }

    #[test]
    fn test_money_rejects_other_shapes() {
        assert!(validate_money("funding", "2.25m").is_err());
        assert!(validate_money("funding", "$2.2m").is_err());
        assert!(validate_money("funding", "$2.250m").is_err());
        assert!(validate_money("funding", "$2.25M").is_err());
        assert!(validate_money("funding", "$2.25m ").is_err());
    }

    #[test]
    fn test_money_error_names_the_field() {
        let err = validate_money("total cost", "bogus").unwrap_err();
        assert!(err.to_string().contains("total cost"));
    }

    #[test]
    fn test_period_accepts_both_dashes() {
        assert!(validate_period("01/01/2023 – 31/12/2024").is_ok());
        assert!(validate_period("01/01/2023 - 31/12/2024").is_ok());
    }

    #[test]
    fn test_period_rejects_bad_shapes() {
        assert!(validate_period("2023 – 2024").is_err());
        assert!(validate_period("1/01/2023 – 31/12/2024").is_err());
        assert!(validate_period("01/01/2023 to 31/12/2024").is_err());
    }

    #[test]
    fn test_period_rejects_impossible_dates() {
        assert!(validate_period("31/02/2023 – 31/12/2023").is_err());
    }

    #[test]
    fn test_period_rejects_start_after_end() {
        let err = validate_period("01/01/2025 – 31/12/2024").unwrap_err();
        assert!(err.to_string().contains("after"));
    }

    #[test]
    fn test_validate_project_accepts_valid_record() {
        assert!(validate_project(&valid_project()).is_ok());
    }

    #[test]
    fn test_validate_project_collects_every_failure() {
        let mut project = valid_project();
        project.name = "  ".to_string();
        project.funding = "2.25".to_string();
        project.period = "whenever".to_string();

        let errors = validate_project(&project).unwrap_err();
        assert_eq!(errors.len(), 3);

        let joined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        let joined = joined.join("; ");
        assert!(joined.contains("name"));
        assert!(joined.contains("funding"));
        assert!(joined.contains("period"));
    }
}
