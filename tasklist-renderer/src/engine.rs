//! Tera rendering engine — [`Renderer`].
//!
//! Every embedded template name ends in `.html`, which puts it under Tera's
//! default autoescape rules: all `{{ … }}` output has `& < > " ' /` escaped.
//! No template pipes task text through `safe`.
//!
//! | Template      | Output                                            |
//! |---------------|---------------------------------------------------|
//! | `page.html`   | whole page: form, count, list, modal              |
//! | `list.html`   | `#empty-state` + `#task-list` fragment            |
//! | `modal.html`  | `#modal` fragment (hidden, loading or error)      |

use tera::Tera;

use tasklist_core::{AppState, Modal};

use crate::context::PageContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates, baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const PAGE: &str = "page.html";
const LIST: &str = "list.html";
const MODAL: &str = "modal.html";

const TPLS: &[(&str, &str)] = &[
    (LIST, include_str!("templates/list.html")),
    (MODAL, include_str!("templates/modal.html")),
    (PAGE, include_str!("templates/page.html")),
];

fn build_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TPLS.iter().copied())?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Full-rebuild HTML renderer. Create once with [`Renderer::new`] and reuse.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer { tera: build_tera()? })
    }

    /// The list fragment, or the empty-state placeholder.
    pub fn render_list(&self, state: &AppState) -> Result<String, RenderError> {
        self.render(LIST, &PageContext::new(state, &Modal::Hidden))
    }

    /// The modal fragment.
    pub fn render_modal(&self, modal: &Modal) -> Result<String, RenderError> {
        self.render(MODAL, &PageContext::new(&AppState::default(), modal))
    }

    /// The complete single-page view.
    pub fn render_page(&self, state: &AppState, modal: &Modal) -> Result<String, RenderError> {
        self.render(PAGE, &PageContext::new(state, modal))
    }

    fn render(&self, name: &str, ctx: &PageContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(name, &tera_ctx)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::{Task, TaskId};

    fn state() -> AppState {
        let mut done = Task::new(2, "Walk dog");
        done.completed = true;
        AppState::with_tasks(vec![done, Task::new(1, "Buy milk")])
    }

    #[test]
    fn renderer_new_succeeds() {
        Renderer::new().expect("Renderer::new should succeed with embedded templates");
    }

    #[test]
    fn one_row_per_task() {
        let html = Renderer::new().unwrap().render_list(&state()).unwrap();
        assert_eq!(html.matches("<li ").count(), 2);
        assert!(html.contains(r#"data-id="2""#));
        assert!(html.contains(r#"data-id="1""#));
    }

    #[test]
    fn completed_row_is_checked() {
        let html = Renderer::new().unwrap().render_list(&state()).unwrap();
        assert!(html.contains("task group completed"));
        assert_eq!(html.matches(" checked").count(), 1);
    }

    #[test]
    fn view_row_has_three_actions_and_tooltip() {
        let html = Renderer::new().unwrap().render_list(&state()).unwrap();
        assert_eq!(html.matches("split-btn").count(), 2);
        assert_eq!(html.matches("edit-btn").count(), 2);
        assert_eq!(html.matches("delete-btn").count(), 2);
        assert!(html.contains(r#"title="Buy milk">Buy milk</span>"#));
    }

    #[test]
    fn edit_row_replaces_view_controls() {
        let mut state = state();
        state.editing = Some(TaskId(1));
        let html = Renderer::new().unwrap().render_list(&state).unwrap();
        assert_eq!(html.matches("edit-input").count(), 1);
        assert!(html.contains(r#"value="Buy milk""#));
        assert_eq!(html.matches("save-btn").count(), 1);
        assert_eq!(html.matches("toggle-checkbox").count(), 1);
    }

    #[test]
    fn empty_state_shown_without_rows() {
        let html = Renderer::new().unwrap().render_list(&AppState::default()).unwrap();
        assert!(html.contains("Nothing to do yet"));
        assert!(!html.contains("<li"));
    }

    #[test]
    fn hidden_modal_renders_hidden_container() {
        let html = Renderer::new().unwrap().render_modal(&Modal::Hidden).unwrap();
        assert!(html.contains(r#"class="modal hidden""#));
    }

    #[test]
    fn loading_modal_has_spinner() {
        let html = Renderer::new().unwrap().render_modal(&Modal::loading(1)).unwrap();
        assert!(html.contains("spinner"));
        assert!(!html.contains("hidden"));
    }

    #[test]
    fn page_shows_pending_count() {
        let html = Renderer::new().unwrap().render_page(&state(), &Modal::Hidden).unwrap();
        assert!(html.contains(r#"<span id="task-count">1</span>"#));
        assert!(html.contains(r#"id="task-form""#));
    }
}
