//! Command-line interface for wily
//!
//! Resolves the configuration from `wily.cfg` and the global flags, then runs
//! one of the configuration subcommands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, WilyConfig, DEFAULT_CONFIG_PATH};

mod clean;
mod show;

/// Track the complexity of code over its history
#[derive(Parser)]
#[command(name = "wily")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(clap::Args)]
struct GlobalArgs {
    /// Print debug information (sets log level to DEBUG)
    #[arg(long, global = true)]
    debug: bool,

    /// Path to the configuration file
    #[arg(long, value_name = "FILE", global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Root path of the project to analyze
    #[arg(short = 'p', long, value_name = "PATH", global = true)]
    path: Option<String>,

    /// Override the directory used for the wily cache
    #[arg(long, value_name = "DIR", global = true)]
    cache: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved configuration
    Show(show::ShowArgs),

    /// Print the cache directory for the configured path
    CachePath,

    /// Remove the cache directory for the configured path
    Clean(clean::CleanArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // --debug forces DEBUG; otherwise RUST_LOG applies, falling back to WARN.
    let filter = if cli.global.debug {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::default().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config = resolve_config(&cli.global)?;

    match cli.command {
        Commands::Show(args) => show::run(&config, args),
        Commands::CachePath => {
            println!("{}", config.cache_path()?.display());
            Ok(())
        }
        Commands::Clean(args) => clean::run(&config, args),
    }
}

/// Load the config file and apply the `--path` and `--cache` overrides.
fn resolve_config(args: &GlobalArgs) -> Result<WilyConfig> {
    let mut config = load_config(&args.config)
        .with_context(|| format!("Failed loading configuration from {}", args.config.display()))?;

    if let Some(path) = &args.path {
        config = config.with_path(path.clone());
    }
    if let Some(cache) = &args.cache {
        config.set_cache_path(cache);
    }

    Ok(config)
}
