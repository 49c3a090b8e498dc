// 📊 Reports - exports and summary aggregations over a project snapshot
//
// Everything here takes a read-only slice; the catalog is never touched.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::codec::json;
use crate::error::{LedgerError, Result};
use crate::record::Project;

const CSV_HEADER: [&str; 8] = [
    "Name",
    "Category",
    "State",
    "Location",
    "Funding",
    "Total Cost",
    "Period",
    "CO2 Output",
];

// ============================================================================
// EXPORTS
// ============================================================================

/// One structured-format object per line, the legacy report layout.
pub fn write_json_lines(projects: &[Project], path: &Path) -> Result<()> {
    let mut lines = String::new();
    for project in projects {
        lines.push_str(&json::encode_line(project)?);
        lines.push('\n');
    }
    fs::write(path, lines).map_err(|e| LedgerError::io(path, e))
}

/// Spreadsheet-friendly export. The CO2 column is empty for plain projects.
pub fn write_csv(projects: &[Project], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| csv_error(path, e))?;

    for project in projects {
        writer
            .write_record([
                project.name.as_str(),
                project.category.as_str(),
                project.state.as_str(),
                project.location.as_str(),
                project.funding.as_str(),
                project.total_cost.as_str(),
                project.period.as_str(),
                project.co2_output().unwrap_or(""),
            ])
            .map_err(|e| csv_error(path, e))?;
    }

    writer.flush().map_err(|e| LedgerError::io(path, e))?;
    Ok(())
}

fn csv_error(path: &Path, error: csv::Error) -> LedgerError {
    let message = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => LedgerError::io(path, source),
        _ => LedgerError::decode(message),
    }
}

// ============================================================================
// SUMMARIES
// ============================================================================

/// Project count and total funding (millions) per state, sorted by state.
/// Unparsable funding counts as zero rather than dropping the project.
pub fn state_summary(projects: &[Project]) -> Vec<(String, usize, f64)> {
    group_summary(projects, |project| project.state.clone())
}

/// Project count and total funding (millions) per category, sorted.
pub fn category_summary(projects: &[Project]) -> Vec<(String, usize, f64)> {
    group_summary(projects, |project| project.category.clone())
}

fn group_summary<F>(projects: &[Project], key: F) -> Vec<(String, usize, f64)>
where
    F: Fn(&Project) -> String,
{
    let mut summary: HashMap<String, (usize, f64)> = HashMap::new();
    for project in projects {
        let entry = summary.entry(key(project)).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += project.funding_value().unwrap_or(0.0);
    }

    let mut result: Vec<(String, usize, f64)> = summary
        .into_iter()
        .map(|(group, (count, funding))| (group, count, funding))
        .collect();
    result.sort_by(|a, b| a.0.cmp(&b.0));
    result
}

/// Total funding (millions) per start year, sorted by year. Projects
/// whose period does not parse have no year and are left out.
pub fn funding_by_year(projects: &[Project]) -> Vec<(i32, f64)> {
    let mut totals: HashMap<i32, f64> = HashMap::new();
    for project in projects {
        if let Some(year) = project.start_year() {
            *totals.entry(year).or_insert(0.0) += project.funding_value().unwrap_or(0.0);
        }
    }

    let mut result: Vec<(i32, f64)> = totals.into_iter().collect();
    result.sort_by_key(|entry| entry.0);
    result
}

// ============================================================================
// TESTS
// ============================================================================
