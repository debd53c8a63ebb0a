//! View model: serializable rendering payload built from [`AppState`].

use serde::Serialize;

use tasklist_core::{AppState, Modal};

use crate::error::RenderError;

/// One visible row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowCtx {
    pub id: i64,
    /// 1-based display position.
    pub position: usize,
    /// Raw task text; escaping is the template engine's job.
    pub text: String,
    pub completed: bool,
    /// Row shows the edit field instead of the view controls.
    pub editing: bool,
}

/// The list plus the pending-count indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub rows: Vec<RowCtx>,
    pub is_empty: bool,
    pub pending_count: usize,
}

impl ListView {
    pub fn from_state(state: &AppState) -> Self {
        let rows = state
            .tasks
            .iter()
            .enumerate()
            .map(|(i, task)| RowCtx {
                id: task.id.0,
                position: i + 1,
                text: task.text.clone(),
                completed: task.completed,
                editing: state.is_editing(task.id),
            })
            .collect();
        ListView { rows, is_empty: state.is_empty(), pending_count: state.pending_count() }
    }
}

/// Full page payload.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub list: ListView,
    pub modal: Modal,
}

impl PageContext {
    pub fn new(state: &AppState, modal: &Modal) -> Self {
        PageContext { list: ListView::from_state(state), modal: modal.clone() }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::{Task, TaskId};

    #[test]
    fn rows_follow_state_order() {
        let mut done = Task::new(3, "done");
        done.completed = true;
        let state = AppState {
            tasks: vec![done, Task::new(2, "b"), Task::new(1, "a")],
            editing: Some(TaskId(2)),
        };
        let view = ListView::from_state(&state);
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.rows[1].position, 2);
        assert!(view.rows[1].editing);
        assert!(!view.rows[0].editing);
        assert_eq!(view.pending_count, 2);
        assert!(!view.is_empty);
    }

    #[test]
    fn modal_serializes_with_kind_tag() {
        let ctx = PageContext::new(&AppState::default(), &Modal::loading(1));
        let json = serde_json::to_value(&ctx).expect("serialize");
        assert_eq!(json["modal"]["kind"], "loading");
        assert!(json["list"]["is_empty"].as_bool().unwrap());
    }

    #[test]
    fn to_tera_context_succeeds() {
        let ctx = PageContext::new(&AppState::default(), &Modal::Hidden);
        ctx.to_tera_context().expect("context conversion");
    }
}
