//! `tasklist render [--out <file>]`: the single-page HTML view.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tasklist_core::Modal;
use tasklist_renderer::Renderer;

use super::open_controller;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Write the page here instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let controller = open_controller()?;
        let renderer = Renderer::new().context("failed to load page templates")?;
        let html = renderer
            .render_page(controller.state(), &Modal::Hidden)
            .context("failed to render page")?;

        match self.out {
            Some(path) => {
                std::fs::write(&path, html)
                    .with_context(|| format!("cannot write '{}'", path.display()))?;
                println!("✓ Wrote {}", path.display());
            }
            None => print!("{html}"),
        }
        Ok(())
    }
}
