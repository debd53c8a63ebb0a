//! # tasklist-renderer
//!
//! Tera-based HTML projection of the task list. Every call rebuilds the whole
//! fragment from the state; task text is always HTML-escaped.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklist_core::{AppState, Modal};
//! use tasklist_renderer::Renderer;
//!
//! fn page(state: &AppState) -> Option<String> {
//!     Renderer::new().ok()?.render_page(state, &Modal::Hidden).ok()
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{ListView, PageContext, RowCtx};
pub use engine::Renderer;
pub use error::RenderError;
