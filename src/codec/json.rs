// 🗂️ Structured Codec - the tagged-map JSON array format
//
// Lossless and strict: every field travels verbatim, the variant tag is
// explicit, and a record missing a mandatory key fails the whole load.
// This format wins over the text file whenever both exist.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{LedgerError, Result};
use crate::record::{Project, ProjectKind};

/// Wire shape of one record. Declaration order here is the key order
/// written to disk; the spaced key names come from the legacy files.
#[derive(Serialize)]
struct Entry<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "State")]
    state: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Funding")]
    funding: &'a str,
    #[serde(rename = "Total Cost")]
    total_cost: &'a str,
    #[serde(rename = "Period")]
    period: &'a str,
    /// Absent for plain projects, null for biomethane with unknown output.
    #[serde(rename = "CO2 Output", skip_serializing_if = "Option::is_none")]
    co2_output: Option<Option<&'a str>>,
}

impl<'a> From<&'a Project> for Entry<'a> {
    fn from(project: &'a Project) -> Self {
        let co2_output = match &project.kind {
            ProjectKind::Plain => None,
            ProjectKind::Biomethane { co2_output } => Some(co2_output.as_deref()),
        };

        Entry {
            kind: project.kind.tag(),
            name: &project.name,
            category: &project.category,
            state: &project.state,
            location: &project.location,
            funding: &project.funding,
            total_cost: &project.total_cost,
            period: &project.period,
            co2_output,
        }
    }
}

// ============================================================================
// ENCODE
// ============================================================================

/// Render the collection as a pretty-printed JSON array.
pub fn encode(projects: &[Project]) -> Result<String> {
    let entries: Vec<Entry> = projects.iter().map(Entry::from).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// One record on a single line, for report exports.
pub fn encode_line(project: &Project) -> Result<String> {
    Ok(serde_json::to_string(&Entry::from(project))?)
}

// ============================================================================
// DECODE
// ============================================================================

/// Parse a structured document. Any record missing a mandatory key (or
/// carrying it with a non-string value) aborts the load; no partial
/// collection comes back.
pub fn decode(content: &str) -> Result<Vec<Project>> {
    let document: Value = serde_json::from_str(content)?;
    let Some(entries) = document.as_array() else {
        return Err(LedgerError::decode("expected a JSON array of project records"));
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| decode_entry(index, entry))
        .collect()
}

fn decode_entry(index: usize, entry: &Value) -> Result<Project> {
    let map = entry
        .as_object()
        .ok_or_else(|| LedgerError::decode(format!("record {} is not an object", index)))?;

    let name = require_str(index, map, "Name")?;
    let category = require_str(index, map, "Category")?;
    let state = require_str(index, map, "State")?;
    let location = require_str(index, map, "Location")?;
    let funding = require_str(index, map, "Funding")?;
    let total_cost = require_str(index, map, "Total Cost")?;
    let period = require_str(index, map, "Period")?;

    // Tag dispatch: unknown or missing tags fall back to a plain project.
    // CO2 Output is optional either way; null and absent both mean unknown.
    let kind = match map.get("type").and_then(Value::as_str) {
        Some("BiomethaneProject") => ProjectKind::Biomethane {
            co2_output: map
                .get("CO2 Output")
                .and_then(Value::as_str)
                .map(str::to_string),
        },
        _ => ProjectKind::Plain,
    };

    Ok(Project {
        name,
        category,
        state,
        location,
        funding,
        total_cost,
        period,
        kind,
    })
}

fn require_str(index: usize, map: &Map<String, Value>, key: &'static str) -> Result<String> {
    match map.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(LedgerError::decode(format!(
            "record {}: field `{}` must be a string, got {}",
            index, key, other
        ))),
        None => Err(LedgerError::MissingField { index, field: key }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
