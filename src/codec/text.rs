// 📄 Text Codec - the legacy "Project info:" block format
//
// Lossy by contract: money collapses to whole dollars, the period collapses
// to its start year, and the variant tag is not representable at all. Load
// is per-entry tolerant; a bad block is dropped, never patched up.

use crate::record::{dollars_to_money, money_to_dollars, Project};

/// Marker line that opens every block and splits the file on load.
pub const BLOCK_DELIMITER: &str = "Project info:";

// ============================================================================
// ENCODE
// ============================================================================

/// Render the whole collection in block form. Unparsable periods turn into
/// a literal `Unknown` year; unparsable money turns into 0 dollars.
pub fn encode(projects: &[Project]) -> String {
    let mut out = String::new();
    for project in projects {
        let year = match project.start_year() {
            Some(year) => year.to_string(),
            None => "Unknown".to_string(),
        };

        out.push_str(BLOCK_DELIMITER);
        out.push('\n');
        out.push_str(&format!("Name: {},\n", project.name));
        out.push_str(&format!("Category: {},\n", project.category));
        out.push_str(&format!("Year Started: {},\n", year));
        out.push_str(&format!("Location: {},\n", project.location));
        out.push_str(&format!("Funding: {},\n", money_to_dollars(&project.funding)));
        out.push_str(&format!(
            "Total Cost: {},\n\n",
            money_to_dollars(&project.total_cost)
        ));
    }
    out
}

// ============================================================================
// DECODE
// ============================================================================

/// Parse block-format content. Blocks missing a required key or carrying
/// non-numeric year/money values are skipped; everything that survives is a
/// plain project. Empty content is an empty catalog, not an error.
pub fn decode(content: &str) -> Vec<Project> {
    content
        .split(BLOCK_DELIMITER)
        .filter(|chunk| !chunk.trim().is_empty())
        .filter_map(|chunk| TextEntry::parse(chunk).into_project())
        .collect()
}

/// Field mapping collected from one block before anything is required of it.
/// Conversion to a record happens in one step once all lines are read, so a
/// duplicate key simply overwrites the earlier value.
#[derive(Debug, Default)]
struct TextEntry {
    name: Option<String>,
    category: Option<String>,
    year_started: Option<String>,
    location: Option<String>,
    funding: Option<String>,
    total_cost: Option<String>,
}

impl TextEntry {
    fn parse(chunk: &str) -> TextEntry {
        let mut entry = TextEntry::default();
        for line in chunk.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim().trim_end_matches(',').to_string();
            match key.trim() {
                "Name" => entry.name = Some(value),
                "Category" => entry.category = Some(value),
                "Year Started" => entry.year_started = Some(value),
                "Location" => entry.location = Some(value),
                "Funding" => entry.funding = Some(value),
                "Total Cost" => entry.total_cost = Some(value),
                _ => {}
            }
        }
        entry
    }

    fn into_project(self) -> Option<Project> {
        let name = self.name?;
        let category = self.category?;
        let year: i32 = self.year_started?.parse().ok()?;
        let location = self.location?;
        let funding: f64 = self.funding?.parse().ok()?;
        let total_cost: f64 = self.total_cost?.parse().ok()?;

        let state = derive_state(&location);
        let period = format!("01/01/{} – 31/12/{}", year, year);
        Some(Project::new(
            name,
            category,
            state,
            location,
            dollars_to_money(funding),
            dollars_to_money(total_cost),
            period,
        ))
    }
}

/// State is whatever follows the last comma of the location, trimmed; a
/// location without a comma is used whole.
fn derive_state(location: &str) -> String {
    match location.rsplit_once(',') {
        Some((_, state)) => state.trim().to_string(),
        None => location.trim().to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ProjectKind;

    fn solar_demo() -> Project {
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

    fn biogas_future() -> Project {
        Project::biomethane(
            "BioGas Future".to_string(),
            "Biomethane".to_string(),
            "Victoria".to_string(),
            "Melbourne, VIC".to_string(),
            "$2.09m".to_string(),
            "$4.58m".to_string(),
            "01/06/2022 – 30/06/2025".to_string(),
            Some("1500t".to_string()),
        )
    }

    #[test]
    fn test_encode_block_layout() {
        let expected = "Project info:\n\
                        Name: Solar Demo,\n\
                        Category: Solar,\n\
                        Year Started: 2023,\n\
                        Location: Sydney, NSW,\n\
                        Funding: 2250000,\n\
                        Total Cost: 5550000,\n\n";

        assert_eq!(encode(&[solar_demo()]), expected);
    }

    #[test]
    fn test_encode_unparsable_period_writes_unknown() {
        let mut project = solar_demo();
        project.period = "sometime soon".to_string();

        let text = encode(&[project]);
        assert!(text.contains("Year Started: Unknown,"));
    }

    #[test]
    fn test_encode_unparsable_money_writes_zero() {
        let mut project = solar_demo();
        project.funding = "a lot".to_string();

        let text = encode(&[project]);
        assert!(text.contains("Funding: 0,"));
    }

    #[test]
    fn test_round_trip_preserves_text_fields() {
        let loaded = decode(&encode(&[solar_demo()]));
        assert_eq!(loaded.len(), 1);

        let project = &loaded[0];
        assert_eq!(project.name, "Solar Demo");
        assert_eq!(project.category, "Solar");
        assert_eq!(project.location, "Sydney, NSW");
        // 2250000 / 1e6 formats back to the exact original string
        assert_eq!(project.funding, "$2.25m");
        assert_eq!(project.total_cost, "$5.55m");
        // the period collapses to the start year on both ends
        assert_eq!(project.period, "01/01/2023 – 31/12/2023");
        // state is re-derived from the location, not carried through
        assert_eq!(project.state, "NSW");
    }

    #[test]
    fn test_round_trip_loses_variant() {
        let loaded = decode(&encode(&[biogas_future()]));
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].kind, ProjectKind::Plain);
        assert_eq!(loaded[0].name, "BioGas Future");
    }

    #[test]
    fn test_decode_skips_block_missing_required_key() {
        let mut content = encode(&[solar_demo()]);
        // middle block has no Total Cost line
        content.push_str(
            "Project info:\n\
             Name: Broken,\n\
             Category: Wind,\n\
             Year Started: 2020,\n\
             Location: Perth, WA,\n\
             Funding: 1000000,\n\n",
        );
        content.push_str(&encode(&[biogas_future()]));

        let loaded = decode(&content);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "Solar Demo");
        assert_eq!(loaded[1].name, "BioGas Future");
    }

    #[test]
    fn test_decode_skips_block_with_non_numeric_values() {
        let content = "Project info:\n\
                       Name: Broken,\n\
                       Category: Wind,\n\
                       Year Started: someday,\n\
                       Location: Perth, WA,\n\
                       Funding: 1000000,\n\
                       Total Cost: 2000000,\n\n\
                       Project info:\n\
                       Name: Also Broken,\n\
                       Category: Wind,\n\
                       Year Started: 2020,\n\
                       Location: Perth, WA,\n\
                       Funding: twelve,\n\
                       Total Cost: 2000000,\n\n";

        assert!(decode(content).is_empty());
    }

    #[test]
    fn test_decode_duplicate_key_last_wins() {
        let content = "Project info:\n\
                       Name: First,\n\
                       Name: Second,\n\
                       Category: Solar,\n\
                       Year Started: 2021,\n\
                       Location: Hobart, TAS,\n\
                       Funding: 500000,\n\
                       Total Cost: 750000,\n\n";

        let loaded = decode(content);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Second");
    }

    #[test]
    fn test_decode_ignores_unrecognized_keys() {
        let content = "Project info:\n\
                       Name: Keeper,\n\
                       Category: Solar,\n\
                       Year Started: 2021,\n\
                       Contractor: Acme,\n\
                       Location: Hobart, TAS,\n\
                       Funding: 500000,\n\
                       Total Cost: 750000,\n\n";

        let loaded = decode(content);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Keeper");
    }

    #[test]
    fn test_decode_empty_content() {
        assert!(decode("").is_empty());
        assert!(decode("\n\n   \n").is_empty());
    }

    #[test]
    fn test_decode_location_without_comma() {
        let content = "Project info:\n\
                       Name: Outback Array,\n\
                       Category: Solar,\n\
                       Year Started: 2019,\n\
                       Location: Far North Queensland,\n\
                       Funding: 3000000,\n\
                       Total Cost: 4000000,\n\n";

        let loaded = decode(content);
        assert_eq!(loaded[0].state, "Far North Queensland");
    }

    #[test]
    fn test_decode_sub_dollar_amounts_format_to_two_decimals() {
        let content = "Project info:\n\
                       Name: Tiny,\n\
                       Category: Solar,\n\
                       Year Started: 2022,\n\
                       Location: Darwin, NT,\n\
                       Funding: 299999,\n\
                       Total Cost: 299999.5,\n\n";

        let loaded = decode(content);
        assert_eq!(loaded[0].funding, "$0.30m");
        assert_eq!(loaded[0].total_cost, "$0.30m");
    }
}
