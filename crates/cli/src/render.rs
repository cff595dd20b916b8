//! Terminal and JSON rendering of lookup results.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use zipquote_core::{CityStateOutcome, PricingRow, SearchMode, Session, ZipOutcome};

/// Output format for results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human readable output (default)
    #[default]
    Table,
}

#[derive(Serialize)]
struct HistoryLine<'a> {
    label: &'a str,
    summary: &'a str,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a titled list of names.
pub fn print_list(title: &str, items: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(items),
        OutputFormat::Table => {
            println!("{} ({})", title.cyan().bold(), items.len());
            for item in items {
                println!("  {item}");
            }
            Ok(())
        }
    }
}

/// Print a ZIP search result.
pub fn print_zip_outcome(outcome: &ZipOutcome, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        return print_json(outcome);
    }

    match &outcome.row {
        Some(row) => {
            println!(
                "{} Quote for {}: {}",
                "✅".green(),
                outcome.zip.bold(),
                outcome.summary.to_string().green().bold()
            );
            println!("{}", format_rows(std::slice::from_ref(row), true));
        }
        None => println!("{} No match for ZIP {}", "✗".red(), outcome.zip.bold()),
    }
    Ok(())
}

/// Print a City/State search result.
pub fn print_city_state_outcome(outcome: &CityStateOutcome, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        return print_json(outcome);
    }

    if outcome.summary.is_match() {
        println!(
            "{} Quote for {}: {}",
            "✅".green(),
            outcome.label().bold(),
            outcome.summary.to_string().green().bold()
        );
        println!("{}", format_rows(&outcome.rows, false));
    } else {
        println!("{} No match for {}", "✗".red(), outcome.label().bold());
    }
    Ok(())
}

/// Print the displayed part of one history list.
pub fn print_history(session: &Session, mode: SearchMode, format: OutputFormat) -> Result<()> {
    let recent = session.recent(mode);

    match format {
        OutputFormat::Json => {
            let lines: Vec<HistoryLine<'_>> = recent
                .iter()
                .map(|(label, summary)| HistoryLine { label, summary })
                .collect();
            print_json(&lines)
        }
        OutputFormat::Table => {
            println!("{}", format!("Recent {mode} searches").cyan().bold());
            if recent.is_empty() {
                println!("  (none)");
            }
            for (label, summary) in &recent {
                println!("  {}", format_history_line(label, summary));
            }
            Ok(())
        }
    }
}

fn format_history_line(label: &str, summary: &str) -> String {
    format!("{label} \u{2014} {summary}")
}

/// Fixed-width table of pricing rows. City and state columns are only shown
/// for ZIP results; City/State results already name them in the heading.
fn format_rows(rows: &[PricingRow], with_place: bool) -> String {
    let mut out = String::new();
    if with_place {
        let city_width = rows
            .iter()
            .map(|r| r.display_city().chars().count())
            .max()
            .unwrap_or(0)
            .max(4);
        out.push_str(&format!(
            "  {:<5}  {:<city_width$}  {:<5}  {:>9}",
            "ZIP", "City", "State", "Quote ($)"
        ));
        for row in rows {
            out.push_str(&format!(
                "\n  {:<5}  {:<city_width$}  {:<5}  {:>9}",
                row.zip,
                row.display_city(),
                row.state,
                row.quote
            ));
        }
    } else {
        out.push_str(&format!("  {:<5}  {:>9}", "ZIP", "Quote ($)"));
        for row in rows {
            out.push_str(&format!("\n  {:<5}  {:>9}", row.zip, row.quote));
        }
    }
    out
}
