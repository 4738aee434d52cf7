use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "focus", about = concat!("focus v", env!("CARGO_PKG_VERSION"), " - plan a session, then work it down"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task to the backlog
    Add(AddArgs),
    /// List session and backlog tasks
    List,
    /// Remove a task
    Rm(RmArgs),
    /// Move a task to the other list
    Switch(SwitchArgs),
    /// Start a session over the current session list
    Start,
    /// Show board statistics
    Stats,
    /// Validate store integrity
    Check,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Estimate in minutes (default from config)
    #[arg(long)]
    pub minutes: Option<u32>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID to remove
    pub id: i64,
}

#[derive(Args)]
pub struct SwitchArgs {
    /// Task ID to move
    pub id: i64,
}
