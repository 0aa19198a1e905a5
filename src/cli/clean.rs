//! Clean command implementation

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::fs;

use crate::config::WilyConfig;

#[derive(Args)]
pub struct CleanArgs {
    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

pub fn run(config: &WilyConfig, args: CleanArgs) -> Result<()> {
    let cache_path = config.cache_path()?;

    if !cache_path.exists() {
        println!("No wily cache found at {}, nothing to clean", cache_path.display());
        return Ok(());
    }
    if !cache_path.is_dir() {
        anyhow::bail!("Cache path is not a directory: {}", cache_path.display());
    }

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Remove the wily cache at {}?", cache_path.display()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    fs::remove_dir_all(cache_path)
        .with_context(|| format!("Failed removing cache {}", cache_path.display()))?;
    tracing::debug!("Removed cache {}", cache_path.display());
    println!("Removed wily cache at {}", cache_path.display());

    Ok(())
}
