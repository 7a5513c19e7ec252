//! Command-line interface.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Weatherboard - weather lookup with per-visitor search history
#[derive(Parser)]
#[command(name = "weatherboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default search paths
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Look up the weather for a city and record the search
    #[command(alias = "l")]
    Lookup {
        /// City name
        #[arg(required = true)]
        city: Vec<String>,
        /// Record the search under this visitor id instead of minting one
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Show a visitor's recent searches
    #[command(alias = "h")]
    History {
        /// Visitor id (the `user_id` cookie value)
        user_id: String,
    },

    /// List known cities matching a fragment
    Cities {
        /// Substring to match; empty lists all
        #[arg(default_value = "")]
        query: String,
    },

    /// Show the most searched cities
    Stats,

    /// Delete search records older than the retention period
    Prune {
        /// Overrides `history.retention_days`
        #[arg(long)]
        days: Option<u32>,
    },
}

pub use commands::*;
