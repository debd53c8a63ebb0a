//! Error types for tasklist-assist.

use thiserror::Error;

/// Everything that can go wrong in one generation call.
///
/// The `Display` text is what the user sees in the error dialog.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Connection, DNS, TLS or I/O failure before a status was received.
    #[error("request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("API error: {code} {reason}")]
    Status { code: u16, reason: String },

    /// The envelope had no `candidates[0].content.parts[0].text`.
    #[error("invalid or empty API response")]
    InvalidResponse,

    /// The model's text was not `{"subtarefas": [string, ...]}`.
    #[error("malformed subtask payload: {0}")]
    Malformed(#[source] serde_json::Error),

    /// `subtarefas` was present but empty.
    #[error("the model returned no subtasks")]
    NoSubtasks,
}
