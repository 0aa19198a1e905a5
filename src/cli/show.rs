//! Show command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};
use console::style;
use serde::Serialize;

use crate::config::WilyConfig;

#[derive(Args)]
pub struct ShowArgs {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: ShowFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct ConfigReport<'a> {
    #[serde(flatten)]
    config: &'a WilyConfig,
    cache_path: String,
}

pub fn run(config: &WilyConfig, args: ShowArgs) -> Result<()> {
    let cache_path = config.cache_path()?.display().to_string();

    match args.format {
        ShowFormat::Json => {
            let report = ConfigReport { config, cache_path };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ShowFormat::Text => {
            let operators: Vec<&str> =
                config.operator_names().iter().map(String::as_str).collect();
            println!("{}", style("--------Configuration---------").bold());
            println!("Path: {}", config.path());
            println!("Archiver: {}", config.archiver_name());
            println!("Operators: {}", operators.join(", "));
            println!("Max revisions: {}", config.revision_limit());
            println!("Targets: {}", config.target_paths().join(", "));
            println!("Include notebooks: {}", config.includes_ipynb());
            println!("Notebook cells: {}", config.uses_ipynb_cells());
            for (key, value) in config.checkout_options() {
                println!("Checkout option {}: {}", key, value);
            }
            println!("Cache: {}", cache_path);
        }
    }

    Ok(())
}
