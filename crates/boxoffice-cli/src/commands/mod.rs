//! Subcommand implementations.

mod api;
mod can;
mod login;
mod logout;
mod report;
mod routes;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::Settings;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Establish a session from a bearer token
    Login(login::LoginArgs),

    /// End the session and forget the stored token
    Logout(logout::LogoutArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),

    /// List console screens and whether the session may open them
    Routes(routes::RoutesArgs),

    /// Check whether the session may open a screen
    Can(can::CanArgs),

    /// Work with back-office collections
    Api(api::ApiCommand),

    /// Fetch the monthly sales report
    Report(report::ReportArgs),
}

pub async fn handle(cmd: Command, settings: &Settings) -> Result<()> {
    match cmd {
        Command::Login(args) => login::run(args, settings).await,
        Command::Logout(args) => logout::run(args, settings).await,
        Command::Whoami(args) => whoami::run(args, settings).await,
        Command::Routes(args) => routes::run(args, settings).await,
        Command::Can(args) => can::run(args, settings).await,
        Command::Api(cmd) => api::handle(cmd, settings).await,
        Command::Report(args) => report::run(args, settings).await,
    }
}
