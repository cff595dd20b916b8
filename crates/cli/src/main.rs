//! # zipquote-cli
//!
//! Command-line interface for pickup quote lookups.

mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use render::OutputFormat;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use zipquote_core::{
    cities_for_state, states, PricingConfig, PricingTable, SearchMode, Session, TableBuilder,
    TableCache,
};

/// Pricing workbook used when no path is given.
const DEFAULT_PRICING_FILE: &str = "Pickup zipcode CAA 3 locations.xlsx";

/// zipquote - pickup quote lookup by ZIP or City & State
#[derive(Parser)]
#[command(name = "zipquote")]
#[command(author, version, about = "Pickup quote lookup by ZIP or City & State", long_about = None)]
struct Cli {
    /// Pricing workbook (one sheet per price tier)
    #[arg(value_name = "FILE", env = "ZIPQUOTE_PRICING", default_value = DEFAULT_PRICING_FILE)]
    file: PathBuf,

    /// Look up a ZIP code
    #[arg(short = 'z', long = "zip")]
    zip: Option<String>,

    /// State for a City & State lookup
    #[arg(short = 's', long = "state", requires = "city")]
    state: Option<String>,

    /// City for a City & State lookup
    #[arg(short = 'c', long = "city", requires = "state")]
    city: Option<String>,

    /// List the states in the pricing table
    #[arg(long = "states")]
    list_states: bool,

    /// List the cities of a state
    #[arg(long = "cities", value_name = "STATE")]
    list_cities: Option<String>,

    /// Start REPL mode (default when no lookup is requested)
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,

    /// Accepted sheet prices, comma separated (defaults to the standard tiers)
    #[arg(long = "prices", value_name = "PRICE", value_delimiter = ',')]
    prices: Vec<u32>,

    /// Output format (table, json)
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn has_query(&self) -> bool {
        self.zip.is_some() || self.city.is_some() || self.list_states || self.list_cities.is_some()
    }

    fn table_builder(&self) -> TableBuilder {
        let mut config = PricingConfig::default();
        if !self.prices.is_empty() {
            config = config.with_expected_prices(self.prices.iter().copied());
        }
        TableBuilder::new(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let mut cache = TableCache::new(cli.table_builder());
    let table = load_table(&mut cache, &cli.file)?;
    let mut session = Session::default();

    if cli.interactive || !cli.has_query() {
        run_repl(&mut cache, &cli.file, table, &mut session, cli.format)
    } else {
        run_once(&cli, &table, &mut session)
    }
}

/// Load the table and refuse to continue without pricing data.
fn load_table(cache: &mut TableCache, path: &Path) -> Result<Arc<PricingTable>> {
    let table = cache
        .get_or_build(path)
        .with_context(|| format!("Failed to load pricing file: {}", path.display()))?;

    if table.is_empty() {
        bail!(
            "No pricing found in {}. Check the sheet names and columns.",
            path.display()
        );
    }
    Ok(table)
}

/// Answer the lookups requested on the command line.
fn run_once(cli: &Cli, table: &PricingTable, session: &mut Session) -> Result<()> {
    if cli.list_states {
        render::print_list("States", &states(table), cli.format)?;
    }

    if let Some(state) = &cli.list_cities {
        let cities = cities_for_state(table, state);
        if cities.is_empty() {
            bail!("No cities priced for state '{state}'");
        }
        render::print_list("Cities", &cities, cli.format)?;
    }

    if let Some(zip) = &cli.zip {
        let outcome = session.search_zip(table, zip)?;
        render::print_zip_outcome(&outcome, cli.format)?;
    }

    if let (Some(state), Some(city)) = (&cli.state, &cli.city) {
        session.select_state(table, state)?;
        session.select_city(table, city)?;
        let outcome = session.search_city_state(table)?;
        render::print_city_state_outcome(&outcome, cli.format)?;
    }

    Ok(())
}

/// A parsed REPL line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Zip(String),
    State(String),
    City(String),
    Search,
    States,
    Cities,
    History(Option<SearchMode>),
    Clear(SearchMode),
    Reload,
    Help,
    Quit,
}

/// Parse one REPL line.
fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let needs_arg = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("Usage: {word} <{what}>"))
        } else {
            Ok(rest.to_string())
        }
    };

    match word.to_lowercase().as_str() {
        ":quit" | ":q" | ":exit" => Ok(Command::Quit),
        ":help" | ":h" | ":?" | "help" => Ok(Command::Help),
        "zip" => needs_arg("zip").map(Command::Zip),
        "state" => needs_arg("state").map(Command::State),
        "city" => needs_arg("city").map(Command::City),
        "search" => Ok(Command::Search),
        "states" => Ok(Command::States),
        "cities" => Ok(Command::Cities),
        "history" if rest.is_empty() => Ok(Command::History(None)),
        "history" => rest.parse().map(|mode| Command::History(Some(mode))),
        "clear" => needs_arg("zip|cs")?.parse().map(Command::Clear),
        "reload" => Ok(Command::Reload),
        // a bare ZIP is a ZIP search
        _ if word.starts_with(|c: char| c.is_ascii_digit()) => Ok(Command::Zip(line.to_string())),
        _ => Err(format!("Unknown command: {line}")),
    }
}

/// Run the REPL.
fn run_repl(
    cache: &mut TableCache,
    path: &Path,
    mut table: Arc<PricingTable>,
    session: &mut Session,
    format: OutputFormat,
) -> Result<()> {
    println!(
        "{} {} - {} ZIP codes priced",
        "zipquote".cyan().bold(),
        env!("CARGO_PKG_VERSION"),
        table.len()
    );
    println!(
        "Type {} for help, {} to exit\n",
        ":help".yellow(),
        ":quit".yellow()
    );

    let mut rl = DefaultEditor::new()?;
    let history_path = dirs_history_path();

    // Load line history if available
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        let prompt = repl_prompt(session).green().bold().to_string();

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                let command = match parse_command(line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{} {e}", "Error:".red().bold());
                        continue;
                    }
                };

                if command == Command::Quit {
                    break;
                }
                if command == Command::Reload {
                    cache.invalidate();
                    match load_table(cache, path) {
                        Ok(fresh) => {
                            println!("Reloaded {} ZIP codes", fresh.len());
                            table = fresh;
                            session.clear_selection();
                        }
                        Err(e) => println!("{} {e:#}", "Error:".red().bold()),
                    }
                    continue;
                }

                if let Err(e) = run_command(command, &table, session, format) {
                    println!("{} {e}", "Warning:".yellow().bold());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                println!("{} {e}", "Error:".red().bold());
                break;
            }
        }
    }

    // Save line history
    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}

/// Execute one table command against the session.
fn run_command(
    command: Command,
    table: &PricingTable,
    session: &mut Session,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Command::Zip(raw) => {
            let outcome = session.search_zip(table, &raw)?;
            render::print_zip_outcome(&outcome, format)?;
        }
        Command::State(raw) => {
            let cities = session.select_state(table, &raw)?;
            render::print_list("Cities", &cities, format)?;
        }
        Command::City(raw) => {
            session.select_city(table, &raw)?;
            println!("Selected {}", selection_label(session));
        }
        Command::Search => {
            let outcome = session.search_city_state(table)?;
            render::print_city_state_outcome(&outcome, format)?;
        }
        Command::States => render::print_list("States", &states(table), format)?,
        Command::Cities => {
            if session.selected_state().is_none() {
                bail!("Select a state first");
            }
            render::print_list("Cities", &session.city_options(table), format)?;
        }
        Command::History(None) => {
            render::print_history(session, SearchMode::Zip, format)?;
            render::print_history(session, SearchMode::CityState, format)?;
        }
        Command::History(Some(mode)) => render::print_history(session, mode, format)?,
        Command::Clear(mode) => {
            session.clear_history(mode);
            println!("Cleared {mode} history");
        }
        Command::Help => print_help(),
        Command::Reload | Command::Quit => {}
    }
    Ok(())
}

/// Prompt showing the current City/State selection.
fn repl_prompt(session: &Session) -> String {
    match session.selected_state() {
        Some(_) => format!("zipquote [{}]> ", selection_label(session)),
        None => "zipquote> ".to_string(),
    }
}

fn selection_label(session: &Session) -> String {
    match (session.selected_city(), session.selected_state()) {
        (Some(city), Some(state)) => format!("{city}, {state}"),
        (None, Some(state)) => state.to_string(),
        _ => String::new(),
    }
}

/// Get the line history file path.
fn dirs_history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|mut p| {
        p.push("zipquote");
        let _ = std::fs::create_dir_all(&p);
        p.push("history.txt");
        p
    })
}

/// Print REPL help.
fn print_help() {
    println!("{}", "zipquote REPL Commands:".cyan().bold());
    println!("  {}        Quote for a ZIP (a bare ZIP works too)", "zip <ZIP>".yellow());
    println!("  {}    Select a state and list its cities", "state <STATE>".yellow());
    println!("  {}      Select a city of the selected state", "city <CITY>".yellow());
    println!("  {}           Quote for the selected city and state", "search".yellow());
    println!("  {}   List states / cities of the selected state", "states, cities".yellow());
    println!("  {}  Recent searches", "history [zip|cs]".yellow());
    println!("  {}    Clear one history list", "clear zip|cs".yellow());
    println!("  {}           Re-read the pricing file", "reload".yellow());
    println!("  {}    Show this help", ":help, :h, :?".yellow());
    println!("  {}  Exit the REPL", ":quit, :q, :exit".yellow());
    println!();
    println!("{}", "Examples:".cyan().bold());
    println!("  zip 02134");
    println!("  state New Jersey");
    println!("  city Newark");
    println!("  search");
}
