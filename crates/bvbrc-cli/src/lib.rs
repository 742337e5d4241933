//! BV-BRC CLI Library
//!
//! Command-line interface over the BV-BRC Data API client.
//!
//! # Overview
//!
//! - **Catalog**: list known collections and their fields (`bvbrc resources`)
//! - **Lookup**: fetch rows by primary key (`bvbrc get genome 83332.12`)
//! - **Query**: build RQL from flags (`bvbrc query genome --eq genus=Salmonella`)
//! - **Search**: keyword search (`bvbrc search genome_feature "beta lactamase"`)
//! - **Configuration**: inspect and edit `config.json` (`bvbrc config`)

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use config::CliContext;
pub use error::{CliError, Result};
pub use output::OutputFormat;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// bvbrc - query the Bacterial and Viral Bioinformatics Resource Center
#[derive(Parser, Debug)]
#[command(name = "bvbrc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data API base URL
    #[arg(long, env = "BVBRC_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Authentication token sent as the Authorization header
    #[arg(long, env = "BVBRC_AUTH_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Config file holding auth_token and base_url
    #[arg(long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    /// Print the full CLI reference as markdown and exit
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List known collections
    Resources {
        /// Also show primary key, equality and range fields
        #[arg(short, long)]
        fields: bool,
    },

    /// Fetch rows of a collection by primary key
    Get {
        /// Collection name (e.g. genome, genome_feature, taxonomy)
        resource: String,

        /// Primary key value
        id: String,

        /// Comma-separated fields to return
        #[arg(short, long, value_delimiter = ',')]
        select: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Query a collection with filters built from flags
    Query(QueryArgs),

    /// Keyword search within a collection
    Search {
        /// Collection name
        resource: String,

        /// Search terms
        keyword: String,

        /// Comma-separated fields to return
        #[arg(short, long, value_delimiter = ',')]
        select: Vec<String>,

        /// Maximum rows
        #[arg(short, long)]
        limit: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Filters and options of `bvbrc query`
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Collection name
    pub resource: String,

    /// Equality filter, repeatable
    #[arg(long = "eq", value_name = "FIELD=VALUE")]
    pub eq: Vec<String>,

    /// Inequality filter, repeatable
    #[arg(long = "ne", value_name = "FIELD=VALUE")]
    pub ne: Vec<String>,

    /// Greater-than filter, repeatable
    #[arg(long = "gt", value_name = "FIELD=VALUE")]
    pub gt: Vec<String>,

    /// Less-than filter, repeatable
    #[arg(long = "lt", value_name = "FIELD=VALUE")]
    pub lt: Vec<String>,

    /// Greater-or-equal filter, repeatable
    #[arg(long = "ge", value_name = "FIELD=VALUE")]
    pub ge: Vec<String>,

    /// Less-or-equal filter, repeatable
    #[arg(long = "le", value_name = "FIELD=VALUE")]
    pub le: Vec<String>,

    /// Match any of several values, repeatable
    #[arg(long = "in", value_name = "FIELD=V1,V2,...")]
    pub any_of: Vec<String>,

    /// Keyword search terms
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Comma-separated fields to return
    #[arg(short, long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Sort expression, e.g. +genome_name or -collection_year
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Maximum rows (the service default is 1000)
    #[arg(short, long)]
    pub limit: Option<u64>,

    /// Request a bulk download (requires --sort)
    #[arg(long)]
    pub download: bool,

    /// Print the request instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Output selection shared by row-producing commands
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format (defaults to table on a terminal, json otherwise)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write results to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print one value from the config file
    Get {
        /// auth_token or base_url
        key: String,
    },

    /// Store a value in the config file
    Set {
        /// auth_token or base_url
        key: String,

        /// Value to store
        value: String,
    },

    /// Remove a value from the config file
    Unset {
        /// auth_token or base_url
        key: String,
    },
}
