//! Terminal rendering of the list and the modal, plus the shell's surface.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use tasklist_app::{io_err, AppError, Surface};
use tasklist_core::{AppState, Modal};
use tasklist_renderer::Renderer;

const MAX_TEXT: usize = 60;
const EMPTY_STATE: &str = "Nothing to do yet. Add a task to get started.";

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "done")]
    done: &'static str,
    #[tabled(rename = "task")]
    text: String,
}

/// Draw the whole list followed by the modal line, if any.
pub fn print_state(state: &AppState, modal: &Modal) {
    if state.is_empty() {
        println!("{}", EMPTY_STATE.dimmed());
    } else {
        let rows: Vec<TaskRow> = state
            .tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let mut text = display_text(&task.text);
                if state.editing == Some(task.id) {
                    text = format!("✎ {text}");
                }
                TaskRow { position: i + 1, done: if task.completed { "✓" } else { "" }, text }
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }
    println!("{}", pending_label(state.pending_count()).bold());
    print_modal(modal);
}

pub fn print_modal(modal: &Modal) {
    match modal {
        Modal::Hidden => {}
        Modal::Loading { message, .. } => eprintln!("{}", message.cyan()),
        Modal::Error { message } => {
            eprintln!("{} {}", "Something went wrong:".red().bold(), message);
            eprintln!("{}", "Type /close to dismiss.".dimmed());
        }
    }
}

fn pending_label(count: usize) -> String {
    match count {
        1 => "1 task pending".to_string(),
        n => format!("{n} tasks pending"),
    }
}

/// Single-line, control-free text cut to the table width.
fn display_text(text: &str) -> String {
    let clean: String =
        text.chars().map(|c| if c.is_control() { ' ' } else { c }).collect();
    if clean.chars().count() <= MAX_TEXT {
        return clean;
    }
    let mut cut: String = clean.chars().take(MAX_TEXT - 1).collect();
    cut.push('…');
    cut
}

// ---------------------------------------------------------------------------
// Shell surface
// ---------------------------------------------------------------------------

/// Prints every redraw and optionally keeps an HTML page in sync.
pub struct TerminalSurface {
    snapshot: Option<(Renderer, PathBuf)>,
}

impl TerminalSurface {
    pub fn new(html: Option<PathBuf>) -> Result<Self> {
        let snapshot = match html {
            Some(path) => {
                Some((Renderer::new().context("failed to load page templates")?, path))
            }
            None => None,
        };
        Ok(TerminalSurface { snapshot })
    }
}

impl Surface for TerminalSurface {
    fn redraw(&mut self, state: &AppState, modal: &Modal) -> Result<(), AppError> {
        println!();
        print_state(state, modal);
        if let Some((renderer, path)) = &self.snapshot {
            let html = renderer.render_page(state, modal)?;
            std::fs::write(path, html).map_err(|e| io_err(path, e))?;
        }
        Ok(())
    }

    fn notice(&mut self, message: &str) {
        println!("{}", message.yellow());
    }
}
