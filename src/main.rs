use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use tally::config::Config;
use tally::counter::{Amount, CounterState};
use tally::logging::init_tracing;
use tally::persist::PersistedStore;
use tally::storage::FileStorage;
use tally::store::{CounterStore, Store};

#[derive(Debug, Parser)]
#[command(name = "tally", version, about = "A counter that remembers its value")]
struct Cli {
    /// Config file (default: <config_dir>/tally/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the storage directory
    #[arg(long, global = true, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Keep the counter in memory only
    #[arg(long, global = true)]
    no_persist: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Counter(CounterCommand),
    /// Delete the stored record
    Clear,
}

/// Commands that work on any [`Store`].
#[derive(Debug, Subcommand)]
enum CounterCommand {
    /// Print the current count
    Show,
    /// Add one, or --by N
    Increment {
        #[arg(long, value_name = "N", allow_hyphen_values = true)]
        by: Option<String>,
    },
    /// Subtract one, or --by N
    Decrement {
        #[arg(long, value_name = "N", allow_hyphen_values = true)]
        by: Option<String>,
    },
    /// Set the count to zero
    Reset,
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    let command = cli
        .command
        .unwrap_or(Command::Counter(CounterCommand::Show));

    if cli.no_persist || !config.storage.enabled {
        let Command::Counter(command) = command else {
            bail!("Persistence is disabled; nothing to clear");
        };
        let store = CounterStore::new();
        return report(&store, command);
    }

    let dir = cli
        .storage_dir
        .clone()
        .unwrap_or_else(|| config.storage.resolved_directory());
    let store = PersistedStore::new(FileStorage::new(&dir), config.storage.persist_options());
    info!(dir = %dir.display(), hydrated = store.has_hydrated(), "opened counter store");

    match command {
        Command::Clear => {
            store.clear_storage().context("Failed to clear stored counter")?;
            println!("cleared");
            Ok(())
        }
        Command::Counter(command) => report(&store, command),
    }
}

fn report<S: Store>(store: &S, command: CounterCommand) -> Result<()> {
    let _changes = store.subscribe(|next, prev| {
        info!(from = prev.count, to = next.count, "count changed");
    });

    let state = execute(store, command)?;
    println!("{}", state.count);
    Ok(())
}

fn execute<S: Store>(store: &S, command: CounterCommand) -> Result<CounterState> {
    let state = match command {
        CounterCommand::Show => store.get_state(),
        CounterCommand::Increment { by: None } => store.increment()?,
        CounterCommand::Increment { by: Some(input) } => {
            store.increment_by(Amount::parse(&input)?)?
        }
        CounterCommand::Decrement { by: None } => store.decrement()?,
        CounterCommand::Decrement { by: Some(input) } => {
            store.decrement_by(Amount::parse(&input)?)?
        }
        CounterCommand::Reset => store.reset()?,
    };
    Ok(state)
}
