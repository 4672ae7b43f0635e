//! MTG card finder command-line interface.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use anyhow::Error;

use mtgfinder_model::{card::Card, response::CardResultPage};

use crate::{app::AppState, search::SearchRequest};

/// The command line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Subcommands.
    ///
    /// Without one, the server is started.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Operational commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Search(SearchCommand),
    Autocomplete(AutocompleteCommand),
}

/// Searches for cards and prints them.
#[derive(clap::Args, Debug)]
pub struct SearchCommand {
    /// The card name to search for.
    ///
    /// Wrap it as `!"Name"` to only match that exact name.
    #[arg(default_value = "")]
    pub name: String,
    /// Only matches cards of this type.
    #[arg(short = 't', long = "type", default_value = "")]
    pub card_type: String,
    /// The page of results.
    ///
    /// Any page after the first repeats the search as typed, without
    /// looking for a better matching name.
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,
}

/// Prints card name suggestions.
#[derive(clap::Args, Debug)]
pub struct AutocompleteCommand {
    /// The start of a card name.
    pub prefix: String,
}

/// Runs a command.
pub async fn run_command(command: &Command, state: &AppState) -> Result<(), Error> {
    match command {
        Command::Search(command) => search(command, state).await,
        Command::Autocomplete(command) => autocomplete(command, state).await,
    }
}

async fn search(command: &SearchCommand, state: &AppState) -> Result<(), Error> {
    let request = if command.page > 1 {
        SearchRequest::paginated(&command.name, &command.card_type, command.page)
    } else {
        SearchRequest::new(&command.name, &command.card_type)
    };

    let results = state.search.execute(request).await?;

    print_results(&mut io::stdout().lock(), &results)?;

    Ok(())
}

async fn autocomplete(command: &AutocompleteCommand, state: &AppState) -> Result<(), Error> {
    let suggestions = state.search.client().autocomplete(&command.prefix).await;

    let mut out = io::stdout().lock();
    for suggestion in suggestions {
        writeln!(out, "{}", suggestion)?;
    }

    Ok(())
}

/// Prints a page of results as plain text.
pub fn print_results(out: &mut impl Write, results: &CardResultPage) -> io::Result<()> {
    writeln!(
        out,
        "{} card(s) found, page {}",
        results.total_cards, results.page
    )?;

    if let Some(suggestion) = results.suggestion.as_ref() {
        writeln!(out, "\nDid you mean \"{}\"?", suggestion)?;
        for card in results.exact_cards.iter() {
            print_card(out, card)?;
        }
        writeln!(out)?;
    }

    for card in results.cards.iter() {
        print_card(out, card)?;
    }

    if let Some(next) = results.next_page() {
        writeln!(out, "\nMore results on page {}.", next)?;
    }

    Ok(())
}

fn print_card(out: &mut impl Write, card: &Card) -> io::Result<()> {
    writeln!(
        out,
        "  {}  {}  {}",
        card.name,
        card.display_mana_cost().unwrap_or("N/A"),
        card.type_line.as_deref().unwrap_or_default(),
    )
}
