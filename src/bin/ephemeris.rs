//! Ephemeris CLI binary
//!
//! Command-line front end for loading Horizons source files (through the
//! disk cache) and querying interpolated positions.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use ephemeris::cache::layout::{CacheLayout, CachePaths};
use ephemeris::cli::{CacheCommands, Cli, Commands};
use ephemeris::config::EphemerisConfig;
use ephemeris::horizons::HorizonsTextFile;
use ephemeris::logging::{init_logging, LoggingConfig};
use ephemeris::translation::HorizonsTranslation;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = load_config(&cli);
    let logging_config = build_logging_config(&cli, &config);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&cli, config) {
        error!("Command failed: {:#}", e);
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, config: EphemerisConfig) -> Result<()> {
    let layout = resolve_layout(cli, &config)?;

    match &cli.command {
        Commands::Query {
            at,
            sources,
            format,
        } => {
            let sources = if sources.is_empty() {
                config.sources.clone()
            } else {
                sources.clone()
            };
            if sources.is_empty() {
                return Err(anyhow!(
                    "no source files given on the command line or in the config"
                ));
            }

            let mut translation =
                HorizonsTranslation::new(Box::new(layout), Box::new(HorizonsTextFile));
            translation.load(&sources)?;
            info!(
                keyframes = translation.timeline().n_keyframes(),
                "Timeline loaded"
            );

            let position = translation.position(*at);
            match format.as_str() {
                "json" => {
                    let out = serde_json::json!({
                        "time": at,
                        "position": position,
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                "text" => {
                    println!(
                        "position at t={}: ({}, {}, {}) m",
                        at, position.x, position.y, position.z
                    );
                }
                other => return Err(anyhow!("unknown output format '{}'", other)),
            }
            Ok(())
        }
        Commands::Cache { command } => match command {
            CacheCommands::Path { source } => {
                println!("{}", layout.cache_path_for(source).display());
                Ok(())
            }
            CacheCommands::Evict { source } => {
                let cache_path = layout.cache_path_for(source);
                layout
                    .remove(&cache_path)
                    .with_context(|| format!("failed to evict {:?}", cache_path))?;
                println!("evicted {}", cache_path.display());
                Ok(())
            }
        },
    }
}

/// Cache root precedence: CLI flag, then config file, then the per-user
/// cache directory.
fn resolve_layout(cli: &Cli, config: &EphemerisConfig) -> Result<CacheLayout> {
    let root: Option<PathBuf> = cli.cache_dir.clone().or_else(|| config.cache_dir.clone());
    match root {
        Some(root) => Ok(CacheLayout::new(root)),
        None => CacheLayout::user_default()
            .ok_or_else(|| anyhow!("no cache directory configured and no home directory found")),
    }
}

fn load_config(cli: &Cli) -> EphemerisConfig {
    match &cli.config {
        Some(path) => EphemerisConfig::load_from_file(path).unwrap_or_else(|e| {
            eprintln!("warning: {}", e);
            EphemerisConfig::default()
        }),
        None => EphemerisConfig::default(),
    }
}

/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &EphemerisConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    logging
}
