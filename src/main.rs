//! wily: track the complexity of code over its history

use anyhow::Result;

fn main() -> Result<()> {
    wily::cli::run()
}
