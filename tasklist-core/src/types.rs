//! Domain types for the task list.
//!
//! All types are serializable via serde; the persisted shape of [`Task`] is
//! `{ "id": <int>, "text": <string>, "completed": <bool> }`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of a task: its creation timestamp in milliseconds.
///
/// Serialized transparently as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for TaskId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), completed: false }
    }
}

/// The whole application state: the ordered task collection plus the
/// transient edit-target.
///
/// `tasks` is in display order (index 0 is shown first). `editing` is never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub tasks: Vec<Task>,
    pub editing: Option<TaskId>,
}

impl AppState {
    /// State with the given tasks and no edit in progress.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks, editing: None }
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Task at a 1-based display position.
    pub fn task_at(&self, position: usize) -> Option<&Task> {
        position.checked_sub(1).and_then(|i| self.tasks.get(i))
    }

    /// Number of tasks not yet completed.
    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.editing == Some(id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
