//! Interactive session runtime.
//!
//! One task owns the [`Controller`] and multiplexes two event sources:
//! input lines, and completions of generation calls running under
//! `spawn_blocking`. Mutations never interleave; a generation in flight does
//! not block further input.
//!
//! End of input stops reading and waits for in-flight generations so their
//! results are applied and saved. `/quit` returns at once.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use tasklist_assist::{GenerateError, SubtaskGenerator};
use tasklist_core::{AppState, KvStore, Modal, TaskId, Ticket};

use crate::command::{self, Input, HELP};
use crate::controller::{Action, Controller};
use crate::error::AppError;

/// Where the session draws. Every redraw is a full rebuild.
pub trait Surface {
    fn redraw(&mut self, state: &AppState, modal: &Modal) -> Result<(), AppError>;

    /// One-line feedback that is not part of the view (help, usage errors).
    fn notice(&mut self, message: &str);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn redraw(&mut self, state: &AppState, modal: &Modal) -> Result<(), AppError> {
        (**self).redraw(state, modal)
    }

    fn notice(&mut self, message: &str) {
        (**self).notice(message)
    }
}

struct Completion {
    ticket: Ticket,
    result: Result<Vec<String>, GenerateError>,
}

enum Flow {
    Continue,
    Quit,
}

pub struct Session<K: KvStore, S: Surface> {
    controller: Controller<K>,
    surface: S,
    generator: Arc<dyn SubtaskGenerator>,
    in_flight: usize,
}

impl<K: KvStore, S: Surface> Session<K, S> {
    pub fn new(controller: Controller<K>, surface: S, generator: Arc<dyn SubtaskGenerator>) -> Self {
        Session { controller, surface, generator, in_flight: 0 }
    }

    /// Run until end of input (after draining generations) or `/quit`.
    /// Returns the controller so callers can inspect the final state.
    pub async fn run<R>(mut self, input: R) -> Result<Controller<K>, AppError>
    where
        R: AsyncBufRead + Unpin,
    {
        tracing::info!(tasks = self.controller.state().tasks.len(), "session started");
        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
        let mut lines = input.lines();
        let mut input_open = true;
        self.redraw();

        while input_open || self.in_flight > 0 {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line.map_err(AppError::Input)? {
                        Some(line) => {
                            if let Flow::Quit = self.handle_line(&line, &tx) {
                                break;
                            }
                        }
                        None => input_open = false,
                    }
                }
                Some(done) = rx.recv() => {
                    self.in_flight -= 1;
                    self.controller.finish_split(done.ticket, done.result);
                    self.redraw();
                }
            }
        }

        if self.in_flight > 0 {
            tracing::warn!(in_flight = self.in_flight, "abandoning subtask generations");
        }
        tracing::info!(tasks = self.controller.state().tasks.len(), "session ended");
        Ok(self.controller)
    }

    fn handle_line(&mut self, line: &str, tx: &mpsc::UnboundedSender<Completion>) -> Flow {
        let input = command::parse(line);
        tracing::debug!(input = %input, "input");

        let action = match input {
            Input::Text(text) => match self.controller.state().editing {
                Some(id) => Action::CommitEdit(id, text),
                None => Action::Submit(text),
            },
            Input::Toggle(n) => match self.resolve(n) {
                Some(id) => Action::Toggle(id),
                None => return Flow::Continue,
            },
            Input::Delete(n) => match self.resolve(n) {
                Some(id) => Action::Delete(id),
                None => return Flow::Continue,
            },
            Input::Edit(n) => match self.resolve(n) {
                Some(id) => Action::BeginEdit(id),
                None => return Flow::Continue,
            },
            Input::Cancel => Action::CancelEdit,
            Input::Close => Action::DismissModal,
            Input::Split(n) => {
                if let Some(id) = self.resolve(n) {
                    self.spawn_split(id, tx);
                }
                return Flow::Continue;
            }
            Input::Help => {
                self.surface.notice(HELP);
                return Flow::Continue;
            }
            Input::Invalid(message) => {
                self.surface.notice(&message);
                return Flow::Continue;
            }
            Input::Quit => return Flow::Quit,
        };

        match self.controller.dispatch(action) {
            Ok(change) if change.needs_render() => self.redraw(),
            Ok(_) => {}
            Err(err) => {
                tracing::error!(error = %err, "action failed");
                self.controller.show_error(&err);
                self.redraw();
            }
        }
        Flow::Continue
    }

    fn spawn_split(&mut self, id: TaskId, tx: &mpsc::UnboundedSender<Completion>) {
        let Some(request) = self.controller.begin_split(id) else {
            return;
        };
        self.redraw();

        let generator = Arc::clone(&self.generator);
        let tx = tx.clone();
        let ticket = request.ticket;
        self.in_flight += 1;
        let worker = tokio::task::spawn_blocking(move || generator.generate(&request.text));
        // Every spawned call reports back exactly once, panics included.
        tokio::spawn(async move {
            let result = match worker.await {
                Ok(result) => result,
                Err(err) => {
                    tracing::error!(ticket, error = %err, "subtask generation aborted");
                    Err(GenerateError::Transport("generation task panicked".to_string()))
                }
            };
            // The receiver only goes away when the session has quit.
            let _ = tx.send(Completion { ticket, result });
        });
    }

    fn resolve(&mut self, position: usize) -> Option<TaskId> {
        let id = self.controller.state().task_at(position).map(|t| t.id);
        if id.is_none() {
            self.surface.notice(&format!("no task at position {position}"));
        }
        id
    }

    fn redraw(&mut self) {
        if let Err(err) = self.surface.redraw(self.controller.state(), self.controller.modal()) {
            tracing::error!(error = %err, "redraw failed");
        }
    }
}
