//! Can command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::Settings;
use crate::output;
use crate::session::Console;

#[derive(Args, Debug)]
pub struct CanArgs {
    /// Screen path, e.g. /showtimes
    pub path: String,
}

pub async fn run(args: CanArgs, settings: &Settings) -> Result<()> {
    let console = Console::restore(settings).await?;
    console.require(&args.path)?;

    output::success(&format!("{} allowed", args.path));
    Ok(())
}
