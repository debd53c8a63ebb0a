use std::path::PathBuf;

use thiserror::Error;

/// Error surface for the controller, surfaces and the interactive session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("storage error: {0}")]
    Store(#[from] tasklist_core::StoreError),

    #[error("render error: {0}")]
    Render(#[from] tasklist_renderer::RenderError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),
}

pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> AppError {
    AppError::Io { path: path.into(), source }
}
