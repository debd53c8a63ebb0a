//! The single owner of application state.
//!
//! Every user event becomes an [`Action`]; [`Controller::dispatch`] runs the
//! store operation, saves when the collection changed, and reports whether a
//! redraw is owed. The generation flow is split in two halves
//! ([`Controller::begin_split`] / [`Controller::finish_split`]) so the remote
//! call can run elsewhere while the state stays usable.

use tasklist_assist::GenerateError;
use tasklist_core::{persistence, AppState, Change, KvStore, Modal, Outcome, TaskId, Ticket};

use crate::error::AppError;

/// A user event, already resolved to task ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Text submitted from the new-task input.
    Submit(String),
    Toggle(TaskId),
    Delete(TaskId),
    BeginEdit(TaskId),
    CommitEdit(TaskId, String),
    CancelEdit,
    DismissModal,
}

/// Work handed out by [`Controller::begin_split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRequest {
    pub ticket: Ticket,
    pub text: String,
}

pub struct Controller<K: KvStore> {
    state: AppState,
    modal: Modal,
    kv: K,
    last_ticket: Ticket,
}

impl<K: KvStore> Controller<K> {
    /// Load the persisted collection from `kv` and start with no edit and no
    /// modal.
    pub fn start(kv: K) -> Self {
        let tasks = persistence::load(&kv);
        tracing::debug!(count = tasks.len(), "loaded tasks");
        Controller { state: AppState::with_tasks(tasks), modal: Modal::Hidden, kv, last_ticket: 0 }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn store(&self) -> &K {
        &self.kv
    }

    /// Apply one action. Returns the change so the caller knows whether to
    /// redraw. A failed save leaves the in-memory state updated.
    pub fn dispatch(&mut self, action: Action) -> Result<Change, AppError> {
        let state = std::mem::take(&mut self.state);
        let outcome = match action {
            Action::Submit(text) => state.add(&text),
            Action::Toggle(id) => state.toggle(id),
            Action::Delete(id) => state.delete(id),
            Action::BeginEdit(id) => state.begin_edit(id),
            Action::CommitEdit(id, text) => state.commit_edit(id, &text),
            Action::CancelEdit => state.cancel_edit(),
            Action::DismissModal => {
                self.state = state;
                return Ok(self.dismiss_modal());
            }
        };
        self.apply(outcome)
    }

    fn dismiss_modal(&mut self) -> Change {
        if !self.modal.is_visible() {
            return Change::None;
        }
        self.modal = std::mem::take(&mut self.modal).dismissed();
        Change::View
    }

    /// Start a generation flow for `id`: show the spinner and hand back the
    /// text to send. `None` when the task no longer exists.
    pub fn begin_split(&mut self, id: TaskId) -> Option<SplitRequest> {
        let text = self.state.task(id)?.text.clone();
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.modal = Modal::loading(ticket);
        tracing::debug!(ticket, task = %id, "split started");
        Some(SplitRequest { ticket, text })
    }

    /// Apply the result of a generation flow.
    ///
    /// Success inserts every item and hides this flow's spinner. Any failure,
    /// including an empty list or a failed save, shows the error dialog.
    pub fn finish_split(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<String>, GenerateError>,
    ) -> Change {
        match result {
            Ok(items) if items.is_empty() => self.show_error(&GenerateError::NoSubtasks),
            Ok(items) => {
                let state = std::mem::take(&mut self.state);
                match self.apply(state.insert_subtasks(&items)) {
                    Ok(_) => {
                        self.modal = std::mem::take(&mut self.modal).succeeded(ticket);
                    }
                    Err(err) => self.show_error(&err),
                }
            }
            Err(err) => {
                tracing::warn!(ticket, error = %err, "split failed");
                self.show_error(&err);
            }
        }
        Change::View
    }

    /// Replace the modal with an error dialog carrying `err`'s message.
    pub fn show_error(&mut self, err: &dyn std::fmt::Display) {
        self.modal = std::mem::take(&mut self.modal).failed(err.to_string());
    }

    fn apply(&mut self, outcome: Outcome) -> Result<Change, AppError> {
        self.state = outcome.state;
        if outcome.change.needs_save() {
            persistence::save(&self.kv, &self.state.tasks)?;
        }
        Ok(outcome.change)
    }
}
