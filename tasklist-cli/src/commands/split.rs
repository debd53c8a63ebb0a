//! `tasklist split <n>`: one blocking generation call.

use anyhow::{bail, Context, Result};
use clap::Args;

use tasklist_assist::{GeminiClient, SubtaskGenerator};
use tasklist_core::Modal;

use super::{open_controller, resolve, ApiArgs};
use crate::view;

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Position of the task as shown by `tasklist list` (1 = top).
    pub position: usize,

    #[command(flatten)]
    pub api: ApiArgs,
}

impl SplitArgs {
    pub fn run(self) -> Result<()> {
        let config = self.api.config()?;
        let generator = GeminiClient::from_config(&config);

        let mut controller = open_controller()?;
        let id = resolve(&controller, self.position)?;
        let request = controller
            .begin_split(id)
            .with_context(|| format!("task at position {} disappeared", self.position))?;
        view::print_modal(controller.modal());

        let result = generator.generate(&request.text);
        controller.finish_split(request.ticket, result);

        if let Modal::Error { message } = controller.modal() {
            bail!("{message}");
        }
        view::print_state(controller.state(), controller.modal());
        Ok(())
    }
}
