// Only compile the UI module when the TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use arena_ledger::{
    report, validate_money, validate_period, validate_required, validate_state, Catalog,
    LedgerError, LoadSource, Project,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    // First argument is the data directory unless it is a command
    let (data_dir, command) = match args.first() {
        Some(first) if !is_command(first) => (PathBuf::from(first), &args[1..]),
        _ => (PathBuf::from("."), &args[..]),
    };

    if command.first().map(String::as_str) == Some("help") {
        print_usage();
        return Ok(());
    }

    let mut catalog = Catalog::new(&data_dir);
    let source = catalog
        .load()
        .with_context(|| format!("failed to load project data from {}", data_dir.display()))?;
    report_load(&catalog, source);

    match command {
        [] => run_ui_mode(&catalog)?,
        [cmd, rest @ ..] => match cmd.as_str() {
            "list" => run_list(&catalog),
            "add" => run_add(&mut catalog)?,
            "edit" => {
                let index = rest
                    .first()
                    .context("edit needs a project index, e.g. `arena-ledger edit 0`")?;
                let index: usize = index.parse().context("project index must be a number")?;
                run_edit(&mut catalog, index)?;
            }
            "search" => run_search(&catalog, rest),
            "report" => run_report(&catalog, rest)?,
            other => {
                eprintln!("❌ Unknown command: {}\n", other);
                print_usage();
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

fn is_command(arg: &str) -> bool {
    matches!(arg, "list" | "add" | "edit" | "search" | "report" | "help")
}

fn report_load(catalog: &Catalog, source: LoadSource) {
    match source {
        LoadSource::Structured => println!(
            "📂 Loaded {} project(s) from {}\n",
            catalog.len(),
            catalog.json_path().display()
        ),
        LoadSource::Text => println!(
            "📂 Loaded {} project(s) from {}\n",
            catalog.len(),
            catalog.text_path().display()
        ),
        LoadSource::NoData => println!("📂 No data found, starting with an empty catalog\n"),
    }
}

fn run_list(catalog: &Catalog) {
    let projects = catalog.projects();

    if projects.is_empty() {
        println!("Catalog is empty. Add a project with `arena-ledger add`.");
        return;
    }

    println!("📋 {} project(s):\n", projects.len());
    for (index, project) in projects.iter().enumerate() {
        println!("[{}]", index);
        println!("{}", project);
        println!();
    }
}

fn run_add(catalog: &mut Catalog) -> Result<()> {
    println!("➕ Adding a new project\n");

    let project = prompt_project()?;
    catalog.add(project);
    save_catalog(catalog)?;

    println!("\n✅ Project added ({} total)", catalog.len());
    Ok(())
}

fn run_edit(catalog: &mut Catalog, index: usize) -> Result<()> {
    let current = catalog.get(index).with_context(|| {
        format!(
            "no project at index {} (catalog holds {})",
            index,
            catalog.len()
        )
    })?;

    println!("✏️  Editing project {}:\n", index);
    println!("{}\n", current);
    println!("Enter the replacement entry.\n");

    let project = prompt_project()?;
    catalog.replace(index, project)?;
    save_catalog(catalog)?;

    println!("\n✅ Project {} updated", index);
    Ok(())
}

fn run_search(catalog: &Catalog, args: &[String]) {
    let (field, value) = match args {
        [field, value, ..] => (field.as_str(), value.as_str()),
        _ => {
            eprintln!("❌ Usage: arena-ledger search <state|category> <value>");
            std::process::exit(1);
        }
    };

    let matches = match field {
        "state" => catalog.find_by_state(value),
        "category" => catalog.find_by_category(value),
        other => {
            eprintln!(
                "❌ Unknown search field: {} (expected state or category)",
                other
            );
            std::process::exit(1);
        }
    };

    if matches.is_empty() {
        println!("No projects matched {} = {}", field, value);
        return;
    }

    for project in &matches {
        println!("{}", project);
        println!();
    }

    let total: f64 = matches.iter().filter_map(|p| p.funding_value()).sum();
    println!(
        "🔍 {} project(s), ${:.2}m total funding",
        matches.len(),
        total
    );
}

fn run_report(catalog: &Catalog, args: &[String]) -> Result<()> {
    let (csv, path) = match args {
        [flag, path, ..] if flag == "--csv" => (true, PathBuf::from(path)),
        [path, ..] => (false, PathBuf::from(path)),
        [] => {
            eprintln!("❌ Usage: arena-ledger report [--csv] <path>");
            std::process::exit(1);
        }
    };

    let projects = catalog.projects();
    if csv {
        report::write_csv(&projects, &path)?;
        println!(
            "📊 Wrote {} project(s) to {} (CSV)",
            projects.len(),
            path.display()
        );
    } else {
        report::write_json_lines(&projects, &path)?;
        println!(
            "📊 Wrote {} project(s) to {} (JSON lines)",
            projects.len(),
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// INTERACTIVE PROMPTS
// ============================================================================

/// Prompt for every field of a project, re-asking until each one validates.
fn prompt_project() -> Result<Project> {
    let name = prompt_validated("Name", |v| validate_required("name", v))?;
    let category = prompt_validated("Category", |v| validate_required("category", v))?;
    let state = prompt_validated("State", validate_state)?;
    let location = prompt_validated("Location", |v| validate_required("location", v))?;
    let funding = prompt_validated("Funding (e.g. $2.25m)", |v| validate_money("funding", v))?;
    let total_cost = prompt_validated("Total Cost (e.g. $4.50m)", |v| {
        validate_money("total cost", v)
    })?;
    let period = prompt_validated("Period (DD/MM/YYYY – DD/MM/YYYY)", validate_period)?;

    let project = if prompt_yes_no("Biomethane project?")? {
        let co2 = prompt_line("Biogenic CO2 output (blank if unknown)")?;
        let co2 = if co2.is_empty() { None } else { Some(co2) };
        Project::biomethane(
            name, category, state, location, funding, total_cost, period, co2,
        )
    } else {
        Project::new(name, category, state, location, funding, total_cost, period)
    };

    Ok(project)
}

fn prompt_validated<F>(label: &str, check: F) -> Result<String>
where
    F: Fn(&str) -> std::result::Result<(), LedgerError>,
{
    loop {
        let value = prompt_line(label)?;
        match check(&value) {
            Ok(()) => return Ok(value),
            Err(error) => eprintln!("   ❌ {}", error),
        }
    }
}

fn prompt_yes_no(label: &str) -> Result<bool> {
    loop {
        let answer = prompt_line(&format!("{} [y/n]", label))?.to_lowercase();
        match answer.as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => eprintln!("   ❌ Please answer y or n"),
        }
    }
}

fn prompt_line(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    read_trimmed_line(&mut io::stdin().lock())
}

/// One trimmed line from the reader. A closed input (zero bytes read) is an
/// error, not a value to validate.
fn read_trimmed_line(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .context("failed to read input")?;
    if bytes == 0 {
        bail!("input closed before the prompt was answered");
    }
    Ok(line.trim().to_string())
}

fn save_catalog(catalog: &Catalog) -> Result<()> {
    catalog.save_text().context("failed to save the text file")?;
    catalog
        .save_json()
        .context("failed to save the structured file")?;
    Ok(())
}

fn print_usage() {
    println!("ARENA project ledger");
    println!();
    println!("Usage: arena-ledger [data-dir] <command>");
    println!();
    println!("Commands:");
    println!("  list                       Print every project");
    println!("  add                        Add a project (interactive)");
    println!("  edit <index>               Replace the project at <index> (interactive)");
    println!("  search state <value>       Find projects by state");
    println!("  search category <value>    Find projects by category");
    println!("  report <path>              Export one JSON object per line");
    println!("  report --csv <path>        Export a CSV table");
    println!("  help                       Show this message");
    println!();
    println!("With no command the TUI browser starts (requires the `tui` feature).");
}

#[cfg(feature = "tui")]
fn run_ui_mode(catalog: &Catalog) -> Result<()> {
    println!("🖥️  Starting the project browser... (Press 'q' to quit)\n");

    let mut app = ui::App::new(catalog.projects());
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_catalog: &Catalog) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!();
    print_usage();
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_trimmed_line_strips_whitespace() {
        let mut input = Cursor::new("  Solar Demo  \n");
        assert_eq!(read_trimmed_line(&mut input).unwrap(), "Solar Demo");
    }

    #[test]
    fn test_read_trimmed_line_errors_on_closed_input() {
        let mut input = Cursor::new("");
        let err = read_trimmed_line(&mut input).unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }
}
