use super::toml_config::TomlConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "company-registry")]
#[command(about = "Manage a list of companies stored as delimited text, CSV or JSON")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Data file to bind instead of the configured default")]
    pub file: Option<String>,

    #[arg(long, global = true, help = "Do not load the data file on startup")]
    pub no_auto_load: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every company
    List,
    /// Show one company by id
    Find { id: String },
    /// Case-insensitive search on id or name
    Search {
        #[arg(default_value = "")]
        term: String,
    },
    /// Add a company and save
    Add {
        id: String,
        name: String,
        address: String,
        budget: String,
    },
    /// Update a company; omitted fields keep their current value
    Update {
        original_id: String,
        #[arg(long = "id")]
        new_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        budget: Option<String>,
    },
    /// Delete a company and save
    Delete { id: String },
    /// Replace all companies with the contents of a file and bind to it
    Import { path: PathBuf },
    /// Write the companies to a file without changing the bound file
    Export { path: PathBuf },
}

impl CliConfig {
    /// Loads the TOML configuration (or defaults) and applies command-line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(file) = &self.file {
            settings.store.default_path = file.clone();
        }
        if self.no_auto_load {
            settings.store.auto_load = false;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(file) = &self.file {
            validate_path("--file", file)?;
        }
        Ok(())
    }
}
