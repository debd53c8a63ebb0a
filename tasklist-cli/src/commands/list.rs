//! `tasklist list [--json]`

use anyhow::{Context, Result};
use clap::Args;

use super::open_controller;
use crate::view;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit the stored tasks as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let controller = open_controller()?;
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&controller.state().tasks)
                    .context("failed to serialize tasks")?
            );
            return Ok(());
        }
        view::print_state(controller.state(), controller.modal());
        Ok(())
    }
}
