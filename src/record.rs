// 🌱 Project Record - one funded renewable-energy project entry
//
// Seven mandatory fields plus a variant tag. Biomethane projects add an
// optional CO2 output figure; everything else is common to both kinds.

use std::fmt;

use chrono::{Datelike, NaiveDate};

// ============================================================================
// PROJECT KIND
// ============================================================================

/// Which concrete kind of project a record is.
///
/// The tag travels with the record through the structured format so a load
/// can rebuild the right kind without external hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectKind {
    Plain,

    /// Biomethane projects report a biogenic CO2 output, e.g. "1500t".
    /// `None` means unknown, which is legal data, not an error.
    Biomethane { co2_output: Option<String> },
}

impl ProjectKind {
    /// Tag string written into the structured format.
    pub fn tag(&self) -> &'static str {
        match self {
            ProjectKind::Plain => "Project",
            ProjectKind::Biomethane { .. } => "BiomethaneProject",
        }
    }
}

// ============================================================================
// PROJECT RECORD
// ============================================================================

/// One project entry.
///
/// `funding` and `total_cost` stay in their `"$X.XXm"` string form (millions
/// of dollars); `period` stays in its `"DD/MM/YYYY – DD/MM/YYYY"` string
/// form. Numeric views are provided by accessors instead of eager parsing,
/// because records decoded from legacy files may not satisfy the patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub category: String,
    /// Letters and spaces only once validated, e.g. "New South Wales".
    pub state: String,
    /// Free text, conventionally "City, State".
    pub location: String,
    pub funding: String,
    pub total_cost: String,
    pub period: String,
    pub kind: ProjectKind,
}

impl Project {
    /// Create a plain project.
    pub fn new(
        name: String,
        category: String,
        state: String,
        location: String,
        funding: String,
        total_cost: String,
        period: String,
    ) -> Self {
        Project {
            name,
            category,
            state,
            location,
            funding,
            total_cost,
            period,
            kind: ProjectKind::Plain,
        }
    }

    /// Create a biomethane project. `co2_output` may be unknown.
    pub fn biomethane(
        name: String,
        category: String,
        state: String,
        location: String,
        funding: String,
        total_cost: String,
        period: String,
        co2_output: Option<String>,
    ) -> Self {
        Project {
            name,
            category,
            state,
            location,
            funding,
            total_cost,
            period,
            kind: ProjectKind::Biomethane { co2_output },
        }
    }

    pub fn is_biomethane(&self) -> bool {
        matches!(self.kind, ProjectKind::Biomethane { .. })
    }

    /// CO2 output figure, flattened across the variant.
    pub fn co2_output(&self) -> Option<&str> {
        match &self.kind {
            ProjectKind::Plain => None,
            ProjectKind::Biomethane { co2_output } => co2_output.as_deref(),
        }
    }

    /// Funding as a number of millions ("$2.25m" → 2.25).
    /// `None` when the string does not follow the money form.
    pub fn funding_value(&self) -> Option<f64> {
        money_to_millions(&self.funding)
    }

    /// Total cost as a number of millions.
    pub fn total_cost_value(&self) -> Option<f64> {
        money_to_millions(&self.total_cost)
    }

    /// Year the project period starts, when the period parses.
    pub fn start_year(&self) -> Option<i32> {
        period_start_year(&self.period)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "State: {}", self.state)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Funding: {}", self.funding)?;
        writeln!(f, "Total Cost: {}", self.total_cost)?;
        write!(f, "Period: {}", self.period)?;
        if let ProjectKind::Biomethane { co2_output } = &self.kind {
            write!(
                f,
                "\nBiogenic CO2 Output: {}",
                co2_output.as_deref().unwrap_or("unknown")
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// MONEY & PERIOD HELPERS
// ============================================================================

/// Parse `"$X.XXm"` into millions. Tolerates missing `$`/`m` decorations
/// but not a non-numeric core.
pub fn money_to_millions(money: &str) -> Option<f64> {
    money
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('m')
        .parse::<f64>()
        .ok()
}

/// Lossy money conversion for the text format: `"$X.XXm"` to whole dollars,
/// truncating toward zero. Anything unparsable becomes 0 by contract.
pub fn money_to_dollars(money: &str) -> i64 {
    match money_to_millions(money) {
        Some(millions) => (millions * 1_000_000.0) as i64,
        None => 0,
    }
}

/// Inverse direction for text loads: raw dollars back to `"$X.XXm"`.
pub fn dollars_to_money(dollars: f64) -> String {
    format!("${:.2}m", dollars / 1_000_000.0)
}

/// Split a period on its dash. Files written by different tools disagree
/// about en dash vs hyphen, so both are accepted.
pub fn split_period(period: &str) -> Option<(&str, &str)> {
    period
        .split_once('–')
        .or_else(|| period.split_once('-'))
        .map(|(start, end)| (start.trim(), end.trim()))
}

/// Parse both endpoints of a period as `DD/MM/YYYY` dates.
pub fn parse_period(period: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (start, end) = split_period(period)?;
    let start = NaiveDate::parse_from_str(start, "%d/%m/%Y").ok()?;
    let end = NaiveDate::parse_from_str(end, "%d/%m/%Y").ok()?;
    Some((start, end))
}

/// Year of the period's start date, if the start date parses.
pub fn period_start_year(period: &str) -> Option<i32> {
    let (start, _) = split_period(period)?;
    NaiveDate::parse_from_str(start, "%d/%m/%Y")
        .ok()
        .map(|date| date.year())
}

// ============================================================================
// TESTS
// ============================================================================
