//! `tasklist add | toggle | edit | delete`: one action, save, redraw.

use anyhow::{Context, Result};
use clap::Args;

use tasklist_app::{Action, Controller};
use tasklist_core::{Change, FileStore};

use super::{open_controller, resolve};
use crate::view;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task text; several words are joined with spaces.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PositionArgs {
    /// Position of the task as shown by `tasklist list` (1 = top).
    pub position: usize,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Position of the task as shown by `tasklist list` (1 = top).
    pub position: usize,

    /// New text; blank text keeps the old one.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

impl AddArgs {
    pub fn run(self) -> Result<()> {
        let mut controller = open_controller()?;
        let change = dispatch(&mut controller, Action::Submit(self.text.join(" ")))?;
        redraw_if(change, &controller);
        Ok(())
    }
}

impl EditArgs {
    pub fn run(self) -> Result<()> {
        let mut controller = open_controller()?;
        let id = resolve(&controller, self.position)?;
        dispatch(&mut controller, Action::BeginEdit(id))?;
        let change = dispatch(&mut controller, Action::CommitEdit(id, self.text.join(" ")))?;
        redraw_if(change, &controller);
        Ok(())
    }
}

pub fn toggle(args: PositionArgs) -> Result<()> {
    let mut controller = open_controller()?;
    let id = resolve(&controller, args.position)?;
    let change = dispatch(&mut controller, Action::Toggle(id))?;
    redraw_if(change, &controller);
    Ok(())
}

pub fn delete(args: PositionArgs) -> Result<()> {
    let mut controller = open_controller()?;
    let id = resolve(&controller, args.position)?;
    let change = dispatch(&mut controller, Action::Delete(id))?;
    redraw_if(change, &controller);
    Ok(())
}

fn dispatch(controller: &mut Controller<FileStore>, action: Action) -> Result<Change> {
    controller
        .dispatch(action)
        .with_context(|| format!("failed to save tasks in {}", controller.store().dir().display()))
}

fn redraw_if(change: Change, controller: &Controller<FileStore>) {
    if change.needs_render() {
        view::print_state(controller.state(), controller.modal());
    }
}
