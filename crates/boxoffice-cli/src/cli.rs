//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use boxoffice_core::ApiUrl;

use crate::commands::Command;

/// Cinema back-office console.
#[derive(Parser, Debug)]
#[command(name = "boxoffice")]
#[command(author, version = env!("BOXOFFICE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the console talks to and where it keeps its session.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Back-office API base URL
    #[arg(long, env = "BOXOFFICE_API_URL", default_value = ApiUrl::DEFAULT, global = true)]
    pub api_url: String,

    /// Directory holding the persisted session (defaults to the platform data dir)
    #[arg(long, env = "BOXOFFICE_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Seconds to wait for the backend to confirm a stored session (0 waits indefinitely)
    #[arg(long, default_value_t = 10, global = true)]
    pub check_timeout: u64,
}
