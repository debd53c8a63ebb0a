//! `tasklist shell`: interactive session on stdin/stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::BufReader;

use tasklist_app::{command::HELP, Controller, Session};
use tasklist_assist::{GeminiClient, SubtaskGenerator};
use tasklist_core::{KvStore, MemoryStore};

use super::{open_controller, ApiArgs};
use crate::view::TerminalSurface;

#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Also rewrite this HTML page on every redraw.
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Keep tasks in memory only; nothing is read or written on disk.
    #[arg(long)]
    pub ephemeral: bool,

    #[command(flatten)]
    pub api: ApiArgs,
}

impl ShellArgs {
    pub fn run(self) -> Result<()> {
        let config = self.api.config()?;
        let generator: Arc<dyn SubtaskGenerator> = Arc::new(GeminiClient::from_config(&config));
        let surface = TerminalSurface::new(self.html.clone())?;
        println!("{HELP}\n");

        if self.ephemeral {
            run_session(Controller::start(MemoryStore::new()), surface, generator)
        } else {
            run_session(open_controller()?, surface, generator)
        }
    }
}

fn run_session<K: KvStore>(
    controller: Controller<K>,
    surface: TerminalSurface,
    generator: Arc<dyn SubtaskGenerator>,
) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let result = runtime.block_on(async {
        let stdin = BufReader::new(tokio::io::stdin());
        Session::new(controller, surface, generator).run(stdin).await
    });
    // A pending stdin read or generation call must not hold the process open.
    runtime.shutdown_background();

    result.context("session failed")?;
    Ok(())
}
