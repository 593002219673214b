//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::present::OutputFormat;
use crate::record::NewRecord;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format (defaults to `display.format` from configuration)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Only show vehicles whose name, make or model contains this text
    #[arg(short = 'm', long = "match", value_name = "TEXT")]
    pub filter: Option<String>,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Display name of the vehicle
    pub name: String,

    /// Manufacturer
    #[arg(long)]
    pub make: String,

    /// Model designation
    #[arg(long)]
    pub model: String,
}

impl AddCommand {
    /// The record this command describes.
    #[must_use]
    pub fn to_record(&self) -> NewRecord {
        NewRecord::new(self.name.clone(), self.make.clone(), self.model.clone())
    }
}

/// Remove command arguments.
#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Id of the vehicle to remove
    pub id: String,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// JSON file holding an array of `{"name", "make", "model"}` objects
    pub file: PathBuf,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
