use std::{fmt, fs::read_to_string, path::PathBuf};

use addressbook::{config, logging, Address, Field, Finder, Lookup, Session};
use anyhow::{Context, Result};
use clap::Parser;
use inquire::{InquireError, Select, Text};
use itertools::Itertools;
use tracing::info;

mod utils;

#[derive(Debug, Parser)]
#[command(version, about = "Find addresses by postcode and keep them in an address book")]
struct Cli {
    /// Settings file, defaults to ./addressbook.toml when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the lookup service root from the settings
    #[arg(long)]
    base_url: Option<String>,

    /// JSON array of addresses to start the book with
    #[arg(long)]
    import: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Find,
    Select,
    Add,
    Remove,
    List,
    Json,
    Clear,
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Command {
    fn all() -> Vec<Self> {
        vec![
            Command::Find,
            Command::Select,
            Command::Add,
            Command::Remove,
            Command::List,
            Command::Json,
            Command::Clear,
            Command::Quit,
        ]
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Find => "Find an address",
            Self::Select => "Select a result",
            Self::Add => "Add personal info to address",
            Self::Remove => "Remove from address book",
            Self::List => "Show address book",
            Self::Json => "Print address book as JSON",
            Self::Clear => "Clear all fields",
            Self::Quit => "Quit",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut settings = config::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(x) = cli.base_url {
        settings.base_url = x;
    }
    info!(base_url = %settings.base_url, "Using lookup service");
    let lookup = Lookup::new(&settings);

    let mut session = Session::new();
    if let Some(path) = &cli.import {
        let addresses: Vec<Address> = serde_json::from_str(
            &read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?,
        )
        .with_context(|| format!("Failed to parse {}", path.display()))?;
        eprintln!("Loaded {} addresses from {}", addresses.len(), path.display());
        session.book_mut().replace_all(addresses);
    }

    loop {
        match step(&mut session, &lookup) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => match err.downcast_ref::<InquireError>() {
                Some(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    break
                }
                _ => return Err(err),
            },
        }
    }

    Ok(())
}

fn prompt(session: &mut Session, field: Field) -> Result<()> {
    let value = Text::new(field.placeholder())
        .with_initial_value(session.value(field))
        .prompt()?;
    session.set(field, value.trim());
    Ok(())
}

fn print_book(session: &Session) {
    let book = session.book().list();
    if book.is_empty() {
        println!("address book is empty");
        return;
    }
    println!("{}", book.iter().map(|x| format!("- {x}")).join("\n"));
}

/// Runs one command; `Ok(false)` ends the session.
fn step(session: &mut Session, lookup: &Lookup) -> Result<bool> {
    match Select::new("🏠", Command::all()).prompt()? {
        Command::Find => {
            prompt(session, Field::PostCode)?;
            prompt(session, Field::HouseNumber)?;

            let found = session.begin_find().and_then(|search| {
                let pb = session
                    .loading()
                    .then(|| utils::spinner("Fetching addresses..."));
                let records = lookup.find(&search.postcode, &search.house_number);
                if let Some(pb) = pb {
                    pb.finish_and_clear();
                }
                session.finish_find(&search, records).map(|x| x.len())
            });

            match found {
                Ok(count) => {
                    println!("found {count} addresses");
                    for x in session.results() {
                        println!("- {x}");
                    }
                }
                Err(err) => eprintln!("error: {err}"),
            }
        }
        Command::Select => {
            if session.results().is_empty() {
                println!("no results, find an address first");
            } else {
                let chosen = Select::new("Address", session.results().to_vec()).prompt()?;
                session.select(chosen.id.as_str());
            }
        }
        Command::Add => {
            prompt(session, Field::FirstName)?;
            prompt(session, Field::LastName)?;
            match session.commit() {
                Ok(outcome) if outcome.changed() => {
                    println!("added, {} in address book", session.book().len())
                }
                Ok(_) => println!("already in address book"),
                Err(err) => eprintln!("error: {err}"),
            }
        }
        Command::Remove => {
            if session.book().is_empty() {
                println!("address book is empty");
            } else {
                let chosen = Select::new("Remove", session.book().list().to_vec()).prompt()?;
                session.remove(chosen.id.as_str());
            }
        }
        Command::List => print_book(session),
        Command::Json => println!("{}", serde_json::to_string_pretty(session.book().list())?),
        Command::Clear => session.clear(),
        Command::Quit => return Ok(false),
    }

    Ok(true)
}
