//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::Settings;
use crate::output;
use crate::session::Console;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, settings: &Settings) -> Result<()> {
    let console = Console::open(settings)?;
    console.session().logout();

    output::success("Logged out");
    Ok(())
}
