//! Collection commands.
//!
//! Each command stands in for the screen that manages the collection and is
//! gated by that screen's roles.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde_json::Value;

use boxoffice_http::Resource;

use crate::cli::Settings;
use crate::output;
use crate::session::Console;

#[derive(Args, Debug)]
pub struct ApiCommand {
    #[command(subcommand)]
    pub command: ApiSubcommand,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum ApiSubcommand {
    /// List every entity of a collection
    List {
        /// Collection name, e.g. clusters or screen-types
        resource: Resource,
    },

    /// Fetch one entity
    Get {
        resource: Resource,
        id: String,
    },

    /// Create an entity from a JSON body
    Create {
        resource: Resource,
        /// JSON body
        #[arg(long)]
        data: String,
    },

    /// Replace an entity with a JSON body
    Update {
        resource: Resource,
        id: String,
        /// JSON body
        #[arg(long)]
        data: String,
    },

    /// Delete an entity
    Delete {
        resource: Resource,
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}

impl ApiSubcommand {
    fn resource(&self) -> Resource {
        match self {
            ApiSubcommand::List { resource }
            | ApiSubcommand::Get { resource, .. }
            | ApiSubcommand::Create { resource, .. }
            | ApiSubcommand::Update { resource, .. }
            | ApiSubcommand::Delete { resource, .. } => *resource,
        }
    }
}

fn parse_body(data: &str) -> Result<Value> {
    serde_json::from_str(data).context("--data is not valid JSON")
}

pub async fn handle(cmd: ApiCommand, settings: &Settings) -> Result<()> {
    let console = Console::restore(settings).await?;
    let resource = cmd.command.resource();
    console.require(resource.route())?;

    let client = console.client();
    let result = match cmd.command {
        ApiSubcommand::List { .. } => client
            .list(resource)
            .await
            .with_context(|| format!("Failed to list {resource}"))?,
        ApiSubcommand::Get { id, .. } => client
            .fetch(resource, &id)
            .await
            .with_context(|| format!("Failed to fetch {resource}/{id}"))?,
        ApiSubcommand::Create { data, .. } => {
            let body = parse_body(&data)?;
            client
                .create(resource, &body)
                .await
                .with_context(|| format!("Failed to create in {resource}"))?
        }
        ApiSubcommand::Update { id, data, .. } => {
            let body = parse_body(&data)?;
            client
                .update(resource, &id, &body)
                .await
                .with_context(|| format!("Failed to update {resource}/{id}"))?
        }
        ApiSubcommand::Delete { id, force, .. } => {
            if !force && !confirm(&format!("Delete {resource}/{id}?"))? {
                eprintln!("Aborted.");
                return Ok(());
            }
            client
                .remove(resource, &id)
                .await
                .with_context(|| format!("Failed to delete {resource}/{id}"))?;
            output::success(&format!("Deleted {resource}/{id}"));
            return Ok(());
        }
    };

    if result.is_null() {
        eprintln!("{}", "No content.".dimmed());
        return Ok(());
    }

    if cmd.pretty {
        output::json_pretty(&result)
    } else {
        output::json(&result)
    }
}

fn confirm(question: &str) -> Result<bool> {
    eprint!("{} [y/N] ", question);
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}
