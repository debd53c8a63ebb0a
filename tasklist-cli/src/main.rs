//! Tasklist: a small to-do list with AI-assisted task splitting.
//!
//! # Usage
//!
//! ```text
//! tasklist add <text...>
//! tasklist list [--json]
//! tasklist toggle <n>
//! tasklist edit <n> <text...>
//! tasklist delete <n>
//! tasklist split <n> [--api-key <key>] [--model <model>]
//! tasklist render [--out <file>]
//! tasklist shell [--html <file>] [--ephemeral]
//! ```
//!
//! `<n>` is the 1-based position shown by `tasklist list`.

mod commands;
mod view;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    list::ListArgs,
    render::RenderArgs,
    shell::ShellArgs,
    split::SplitArgs,
    tasks::{AddArgs, EditArgs, PositionArgs},
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    version,
    about = "Keep a to-do list and split big tasks into subtasks with AI",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a task to the top of the list.
    Add(AddArgs),

    /// Show the list.
    List(ListArgs),

    /// Mark a task done, or not done again.
    Toggle(PositionArgs),

    /// Replace a task's text (blank text leaves it unchanged).
    Edit(EditArgs),

    /// Delete a task.
    Delete(PositionArgs),

    /// Split a task into 3–5 subtasks with the generation API.
    Split(SplitArgs),

    /// Write the HTML page for the current list.
    Render(RenderArgs),

    /// Start an interactive session.
    Shell(ShellArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Add(args) => args.run(),
        Commands::List(args) => args.run(),
        Commands::Toggle(args) => commands::tasks::toggle(args),
        Commands::Edit(args) => args.run(),
        Commands::Delete(args) => commands::tasks::delete(args),
        Commands::Split(args) => args.run(),
        Commands::Render(args) => args.run(),
        Commands::Shell(args) => args.run(),
    }
}

/// Logs go to stderr so stdout stays clean for `--json` and `render`.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
