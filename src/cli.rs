//! Command-line interface for Trendarr.

use clap::{Parser, Subcommand};

/// Trendarr - Movie & TV discovery and trending service
#[derive(Parser)]
#[command(name = "trendarr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server
    #[command(alias = "daemon")]
    Serve,

    /// Search movies and series by title
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show trending entries aggregated from search counters
    #[command(alias = "t")]
    Trending {
        /// Show series instead of movies
        #[arg(long)]
        tv: bool,

        /// Number of entries to show
        #[arg(long)]
        limit: Option<usize>,

        /// Keep running and print each carousel advance
        #[arg(long)]
        watch: bool,
    },

    /// Write a default config.toml if none exists
    InitConfig,
}
