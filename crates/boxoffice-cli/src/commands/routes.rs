//! Routes command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use boxoffice_core::access::{self, Access, CONSOLE_ROUTES};

use crate::cli::Settings;
use crate::output;
use crate::session::Console;

#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// Only list screens the session may open
    #[arg(long)]
    pub visible: bool,

    /// Print one JSON object per route
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RouteLine<'a> {
    path: &'a str,
    required_roles: &'a [&'a str],
    access: Access,
}

pub async fn run(args: RoutesArgs, settings: &Settings) -> Result<()> {
    let console = Console::restore(settings).await?;
    let identity = console.session().identity();

    for route in CONSOLE_ROUTES.routes() {
        let outcome = access::check(route, &identity);
        if args.visible && !outcome.is_allowed() {
            continue;
        }

        if args.json {
            output::json(&RouteLine {
                path: route.path,
                required_roles: route.required_roles,
                access: outcome,
            })?;
            continue;
        }

        let label = if route.is_public() {
            route.path.to_string()
        } else {
            format!("{} ({})", route.path, route.required_roles.join(" | "))
        };

        if outcome.is_allowed() {
            output::success(&label);
        } else {
            output::denied(&label);
        }
    }

    Ok(())
}
