//! CLI definitions: clap types only, no behavior.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ephemeris CLI - interpolated positions from JPL Horizons samples
#[derive(Parser)]
#[command(name = "ephemeris")]
#[command(about = "Query interpolated positions from cached Horizons ephemeris files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cache root directory (overrides config and the per-user default)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load source files and print the interpolated position at a time
    Query {
        /// Query time, seconds past the J2000 epoch
        #[arg(long)]
        at: f64,

        /// Horizons source files (falls back to the config file's list)
        sources: Vec<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show the cache path a source file resolves to
    Path {
        /// Horizons source file
        source: PathBuf,
    },
    /// Delete the cache file for a source file
    Evict {
        /// Horizons source file
        source: PathBuf,
    },
}
