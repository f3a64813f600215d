//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **browse**: Interactive catalog browser (default)
//! - **search**: Run the query pipeline once and print the results
//! - **list**: Print the available use cases or categories
//! - **generate**: Expand a catalog into a large synthetic dataset
//! - **config**: Inspect or initialize the configuration file
//!
//! Global flags: `--quiet`, `--verbose`, and `--dataset` (which overrides
//! the configured dataset).

use crate::query::SortKey;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Which option list to print
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListVariant {
    /// Every use case in the catalog
    UseCases,
    /// Categories, optionally within one use case
    Categories,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "templar")]
#[command(about = "Browse, search, and filter automation templates", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Only print errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Print debug logs
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// JSON dataset to load (overrides config)
    #[arg(long = "dataset", value_name = "PATH", global = true)]
    pub dataset: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive browser (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Start from this query string instead of the saved one (`q=slack&sort=complexity`)
        #[arg(long = "url", value_name = "QUERY_STRING")]
        url: Option<String>,
    },

    /// Search the catalog and print matching templates
    #[command(visible_alias = "s")]
    Search {
        /// Free-text query
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Only templates for this use case
        #[arg(short = 'u', long = "use-case", value_name = "USE_CASE")]
        use_case: Option<String>,

        /// Required categories (repeatable: -c crm -c email)
        #[arg(short = 'c', long = "category", value_name = "CATEGORY")]
        categories: Vec<String>,

        /// Sort order: popularity, setup_time, or complexity
        #[arg(short = 's', long = "sort", value_name = "KEY")]
        sort: Option<SortKey>,

        /// Print at most this many results
        #[arg(short = 'n', long = "limit", value_name = "N")]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// List use cases or categories
    #[command(visible_alias = "ls")]
    List {
        #[arg(value_enum)]
        variant: ListVariant,

        /// Restrict categories to this use case
        #[arg(short = 'u', long = "use-case", value_name = "USE_CASE")]
        use_case: Option<String>,
    },

    /// Write a synthetic catalog built from a base catalog
    Generate {
        /// Number of records to write
        #[arg(short = 'n', long = "count", default_value_t = crate::dataset::generate::DEFAULT_COUNT)]
        count: usize,

        /// Output file
        #[arg(short = 'o', long = "out", value_name = "PATH")]
        out: PathBuf,

        /// Base catalog (defaults to the bundled sample)
        #[arg(long = "base", value_name = "PATH")]
        base: Option<PathBuf>,

        /// Random seed
        #[arg(long = "seed", default_value_t = crate::dataset::generate::DEFAULT_SEED)]
        seed: u64,
    },

    /// Inspect or initialize configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default config file if none exists
    Init {
        /// Overwrite an existing file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Browse { url: None })
    }
}
