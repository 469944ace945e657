//! Report command implementation.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Args;

use crate::cli::Settings;
use crate::output;
use crate::session::Console;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Month to report on, as YYYY-MM (defaults to the current month)
    #[arg(long)]
    pub month: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ReportArgs, settings: &Settings) -> Result<()> {
    let month = match args.month {
        Some(month) => {
            NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
                .with_context(|| format!("Invalid month '{month}', expected YYYY-MM"))?;
            month
        }
        None => Utc::now().format("%Y-%m").to_string(),
    };

    let console = Console::restore(settings).await?;
    console.require("/report")?;

    let report = console
        .client()
        .monthly_report(&month)
        .await
        .context("Failed to fetch report")?;

    if args.pretty {
        output::json_pretty(&report)
    } else {
        output::json(&report)
    }
}
