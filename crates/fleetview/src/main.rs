//! `fleetview` - CLI for the fleetview record list
//!
//! This binary manages the local vehicle store and renders its contents
//! through the list view.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;

use fleetview::cli::{
    AddCommand, Cli, Command, ConfigCommand, ImportCommand, ListCommand, RemoveCommand,
};
use fleetview::{
    init_logging, mount, present, Config, ListView, NewRecord, OutputFormat, RecordId, Storage,
    StorageProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let load = || Config::load_from(cli.config.clone()).context("loading configuration");

    match &cli.command {
        Command::List(list_cmd) => handle_list(&load()?, list_cmd, cli.quiet).await,
        Command::Add(add_cmd) => handle_add(&load()?, add_cmd),
        Command::Remove(remove_cmd) => handle_remove(&load()?, remove_cmd),
        Command::Import(import_cmd) => handle_import(&load()?, import_cmd),
        Command::Status(status_cmd) => handle_status(&load()?, status_cmd.json),
        Command::Config(config_cmd) => handle_config(cli.config.clone(), config_cmd),
    }
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let path = config.database_path();
    Storage::open(&path).with_context(|| format!("opening store at {}", path.display()))
}

async fn handle_list(config: &Config, cmd: &ListCommand, quiet: bool) -> anyhow::Result<()> {
    let storage = Arc::new(Mutex::new(open_storage(config)?));
    let mut provider = StorageProvider::new(storage, config.fetch_timeout());
    if let Some(filter) = &cmd.filter {
        provider = provider.with_filter(filter.clone());
    }

    let view = ListView::from_config(&config.display);
    let format = cmd.format.unwrap_or(config.display.format);
    let mut mounted = mount(Arc::new(provider));

    if !quiet && format != OutputFormat::Json && std::io::stdout().is_terminal() {
        print!("{}", present(&view.render(&mounted.snapshot()), format)?);
    }

    let snapshot = mounted.resolved().await;
    print!("{}", present(&view.render(&snapshot), format)?);
    Ok(())
}

fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let id = storage.insert(&cmd.to_record())?;
    println!("{id}");
    Ok(())
}

fn handle_remove(config: &Config, cmd: &RemoveCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let id = RecordId::new(cmd.id.clone());
    if storage.delete(&id)? {
        println!("Removed {id}");
        Ok(())
    } else {
        Err(fleetview::Error::record_not_found(id.as_str()).into())
    }
}

fn handle_import(config: &Config, cmd: &ImportCommand) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&cmd.file)
        .with_context(|| format!("reading {}", cmd.file.display()))?;
    let records: Vec<NewRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", cmd.file.display()))?;

    let mut storage = open_storage(config)?;
    let ids = storage.insert_all(&records)?;
    println!("Imported {} vehicles", ids.len());
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let stats = storage.stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "total_records": stats.total_records,
            "oldest_record": stats.oldest_record,
            "newest_record": stats.newest_record,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("fleetview status");
        println!("----------------");
        println!("Database:      {}", storage.path().display());
        println!("Vehicles:      {}", stats.total_records);
        if let Some(oldest) = stats.oldest_record {
            println!("Oldest entry:  {}", oldest.to_rfc3339());
        }
        if let Some(newest) = stats.newest_record {
            println!("Newest entry:  {}", newest.to_rfc3339());
        }
        println!("Size (bytes):  {}", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path).context("loading configuration")?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Display]");
                println!("  Noun:               {}", config.display.noun);
                println!("  Loading text:       {}", config.display.loading_text);
                println!("  Format:             {:?}", config.display.format);
                println!();
                println!("[Provider]");
                println!(
                    "  Fetch timeout (ms): {}",
                    config.provider.fetch_timeout_ms
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .clone()
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("invalid configuration in {}", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
