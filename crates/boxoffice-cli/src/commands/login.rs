//! Login command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use clap::builder::NonEmptyStringValueParser;
use colored::Colorize;

use crate::cli::Settings;
use crate::output;
use crate::session::Console;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Bearer token issued by the back-office login endpoint
    #[arg(
        long,
        env = "BOXOFFICE_TOKEN",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub token: String,

    /// Store the token without asking the backend to confirm it
    #[arg(long)]
    pub skip_check: bool,
}

pub async fn run(args: LoginArgs, settings: &Settings) -> Result<()> {
    let console = Console::open(settings)?;

    if !args.skip_check {
        eprintln!("{}", "Checking token...".dimmed());
        if !console.check(&args.token).await {
            bail!("The backend did not accept this token");
        }
    }

    let identity = console
        .session()
        .establish(&args.token)
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Username", &identity.username);
    output::field("Roles", &identity.roles.join(", "));

    Ok(())
}
