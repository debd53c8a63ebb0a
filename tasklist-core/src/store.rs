//! Task Store operations.
//!
//! # API pattern
//!
//! Every operation consumes an [`AppState`] and returns an [`Outcome`]: the
//! updated state plus a [`Change`] telling the caller which side effects to
//! run (save, re-render, or nothing).
//!
//! Operations that allocate ids have two forms:
//! - `fn_at(…, now_ms)` — explicit clock; used in tests
//! - `fn(…)` — reads the wall clock via `chrono::Utc::now()`, delegates to `_at`

use chrono::Utc;

use crate::types::{AppState, Task, TaskId};

/// Marker prepended to every generated subtask.
pub const SUBTASK_PREFIX: &str = "- ";

/// Side effects owed after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing observable happened.
    None,
    /// Only the transient edit-target changed: re-render, do not save.
    View,
    /// The task collection was written: save, then re-render.
    Tasks,
}

impl Change {
    pub fn needs_save(self) -> bool {
        matches!(self, Change::Tasks)
    }

    pub fn needs_render(self) -> bool {
        !matches!(self, Change::None)
    }
}

/// Result of a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Outcome {
    pub state: AppState,
    pub change: Change,
}

impl Outcome {
    fn new(state: AppState, change: Change) -> Self {
        Self { state, change }
    }
}

impl AppState {
    /// Allocate a fresh id: `max(now_ms, highest existing id + 1)`.
    ///
    /// When the highest id is `i64::MAX` the first free id at or after
    /// `now_ms` is used instead, wrapping below it if needed.
    pub fn next_id_at(&self, now_ms: i64) -> TaskId {
        let Some(highest) = self.tasks.iter().map(|t| t.id.0).max() else {
            return TaskId(now_ms);
        };
        if let Some(floor) = highest.checked_add(1) {
            return TaskId(now_ms.max(floor));
        }
        let free = |candidate: &i64| self.task(TaskId(*candidate)).is_none();
        let id = (now_ms..=i64::MAX)
            .find(free)
            .or_else(|| (i64::MIN..now_ms).rev().find(free))
            .unwrap_or(now_ms);
        TaskId(id)
    }

    /// Insert a new task at the front. Blank text is ignored.
    pub fn add(self, text: &str) -> Outcome {
        self.add_at(text, Utc::now().timestamp_millis())
    }

    /// [`AppState::add`] with an explicit clock.
    pub fn add_at(mut self, text: &str, now_ms: i64) -> Outcome {
        if text.trim().is_empty() {
            return Outcome::new(self, Change::None);
        }
        let id = self.next_id_at(now_ms);
        self.tasks.insert(0, Task::new(id, text));
        Outcome::new(self, Change::Tasks)
    }

    /// Flip `completed` on the matching task.
    pub fn toggle(mut self, id: TaskId) -> Outcome {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                Outcome::new(self, Change::Tasks)
            }
            None => Outcome::new(self, Change::None),
        }
    }

    /// Remove the matching task. The collection is re-written even when the
    /// id is absent.
    pub fn delete(mut self, id: TaskId) -> Outcome {
        self.tasks.retain(|t| t.id != id);
        if self.editing == Some(id) {
            self.editing = None;
        }
        Outcome::new(self, Change::Tasks)
    }

    /// Put one task into edit mode, replacing any previous edit-target.
    pub fn begin_edit(mut self, id: TaskId) -> Outcome {
        self.editing = Some(id);
        Outcome::new(self, Change::View)
    }

    /// Replace the task's text with the trimmed `new_text`.
    ///
    /// Blank text (or an unknown id) discards the edit silently. Edit mode is
    /// cleared either way.
    pub fn commit_edit(mut self, id: TaskId, new_text: &str) -> Outcome {
        self.editing = None;
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return Outcome::new(self, Change::View);
        }
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.text = trimmed.to_string();
                Outcome::new(self, Change::Tasks)
            }
            None => Outcome::new(self, Change::View),
        }
    }

    /// Leave edit mode without touching any task.
    pub fn cancel_edit(mut self) -> Outcome {
        self.editing = None;
        Outcome::new(self, Change::View)
    }

    /// Insert generated subtasks above the current list, keeping `items` order.
    pub fn insert_subtasks(self, items: &[String]) -> Outcome {
        self.insert_subtasks_at(items, Utc::now().timestamp_millis())
    }

    /// [`AppState::insert_subtasks`] with an explicit clock.
    pub fn insert_subtasks_at(self, items: &[String], now_ms: i64) -> Outcome {
        let mut state = self;
        let mut change = Change::None;
        // Front insertion reverses order, so walk the items back to front.
        for item in items.iter().rev() {
            let outcome = state.add_at(&format!("{SUBTASK_PREFIX}{item}"), now_ms);
            if outcome.change.needs_save() {
                change = Change::Tasks;
            }
            state = outcome.state;
        }
        Outcome::new(state, change)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(state: &AppState) -> Vec<&str> {
        state.tasks.iter().map(|t| t.text.as_str()).collect()
    }

    fn seeded() -> AppState {
        AppState::default()
            .add_at("Buy milk", 1_000)
            .state
            .add_at("Walk dog", 2_000)
            .state
    }

    #[test]
    fn blank_add_is_ignored() {
        let before = seeded();
        let outcome = before.clone().add_at(" \t\n ", 3_000);
        assert_eq!(outcome.change, Change::None);
        assert_eq!(outcome.state, before);
    }

    #[test]
    fn newest_task_comes_first() {
        assert_eq!(texts(&seeded()), vec!["Walk dog", "Buy milk"]);
    }

    #[test]
    fn add_keeps_text_untrimmed() {
        let state = AppState::default().add_at("  padded  ", 1).state;
        assert_eq!(state.tasks[0].text, "  padded  ");
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let state = AppState::default()
            .add_at("a", 5)
            .state
            .add_at("b", 5)
            .state
            .add_at("c", 5)
            .state;
        let ids: Vec<i64> = state.tasks.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![7, 6, 5]);
    }

    #[test]
    fn stored_max_id_does_not_overflow() {
        let state = AppState::with_tasks(vec![Task::new(i64::MAX, "from storage")]);
        let outcome = state.add_at("next", 1_000);
        assert_eq!(outcome.change, Change::Tasks);
        assert_eq!(outcome.state.tasks[0].id, TaskId(1_000));
        assert_eq!(outcome.state.tasks[1].id, TaskId(i64::MAX));
    }

    #[test]
    fn max_id_fallback_skips_taken_ids() {
        let state = AppState::with_tasks(vec![
            Task::new(i64::MAX, "from storage"),
            Task::new(1_000, "same millisecond"),
        ]);
        assert_eq!(state.next_id_at(1_000), TaskId(1_001));
    }

    #[test]
    fn toggle_twice_restores_completion() {
        let state = seeded();
        let id = state.tasks[0].id;
        let once = state.clone().toggle(id);
        assert!(once.state.tasks[0].completed);
        assert_eq!(once.change, Change::Tasks);
        let twice = once.state.toggle(id);
        assert_eq!(twice.state, state);
    }

    #[test]
    fn toggle_missing_id_is_noop() {
        let state = seeded();
        let outcome = state.clone().toggle(TaskId(999));
        assert_eq!(outcome.change, Change::None);
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn delete_missing_id_leaves_collection_unchanged() {
        let state = seeded();
        let outcome = state.clone().delete(TaskId(999));
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn delete_removes_task_and_its_edit_mode() {
        let state = seeded();
        let id = state.tasks[1].id;
        let outcome = state.begin_edit(id).state.delete(id);
        assert_eq!(texts(&outcome.state), vec!["Walk dog"]);
        assert_eq!(outcome.state.editing, None);
    }

    #[test]
    fn begin_edit_only_touches_view() {
        let state = seeded();
        let id = state.tasks[0].id;
        let outcome = state.begin_edit(id);
        assert_eq!(outcome.change, Change::View);
        assert!(outcome.state.is_editing(id));
    }

    #[test]
    fn commit_edit_trims_and_clears_edit_mode() {
        let state = seeded();
        let id = state.tasks[0].id;
        let outcome = state.begin_edit(id).state.commit_edit(id, "  Walk the dog  ");
        assert_eq!(outcome.change, Change::Tasks);
        assert_eq!(outcome.state.tasks[0].text, "Walk the dog");
        assert_eq!(outcome.state.editing, None);
    }

    #[test]
    fn commit_blank_edit_discards_silently() {
        let state = seeded();
        let id = state.tasks[0].id;
        let outcome = state.clone().begin_edit(id).state.commit_edit(id, "");
        assert_eq!(outcome.change, Change::View);
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn cancel_edit_keeps_tasks() {
        let state = seeded();
        let id = state.tasks[0].id;
        let outcome = state.clone().begin_edit(id).state.cancel_edit();
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn subtasks_land_above_list_in_model_order() {
        let state = AppState::default().add_at("Plan trip", 1_000).state;
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let outcome = state.insert_subtasks_at(&items, 2_000);
        assert_eq!(outcome.change, Change::Tasks);
        assert_eq!(texts(&outcome.state), vec!["- a", "- b", "- c", "Plan trip"]);
    }

    #[test]
    fn no_subtasks_means_no_change() {
        let state = seeded();
        let outcome = state.clone().insert_subtasks_at(&[], 3_000);
        assert_eq!(outcome.change, Change::None);
        assert_eq!(outcome.state, state);
    }
}
