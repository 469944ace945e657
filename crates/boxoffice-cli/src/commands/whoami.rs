//! Whoami command implementation.

use anyhow::{Result, bail};
use clap::Args;

use crate::cli::Settings;
use crate::output;
use crate::session::Console;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the identity as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, settings: &Settings) -> Result<()> {
    let console = Console::restore(settings).await?;
    let identity = console.session().identity();

    if !identity.is_authenticated() {
        bail!("No active session. Run 'boxoffice login' first.");
    }

    if args.json {
        return output::json(&identity);
    }

    output::field("Username", &identity.username);
    output::field("Roles", &identity.roles.join(", "));

    Ok(())
}
