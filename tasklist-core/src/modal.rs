//! Modal state for the subtask-generation flow.
//!
//! ```text
//! Hidden ──start──▶ Loading ──success──▶ Hidden
//!                      │
//!                      └──failure──▶ Error ──dismiss──▶ Hidden
//! ```
//!
//! Each generation carries a ticket. A new `start` replaces whatever the modal
//! shows; a success only hides the spinner it was started with.

use serde::Serialize;

/// Message shown while a generation call is in flight.
pub const LOADING_MESSAGE: &str = "✨ Analysing and splitting the task...";

/// Identifies one generation call.
pub type Ticket = u64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Modal {
    #[default]
    Hidden,
    Loading { ticket: Ticket, message: String },
    Error { message: String },
}

impl Modal {
    pub fn loading(ticket: Ticket) -> Self {
        Modal::Loading { ticket, message: LOADING_MESSAGE.to_string() }
    }

    /// A call finished successfully.
    pub fn succeeded(self, ticket: Ticket) -> Self {
        match self {
            Modal::Loading { ticket: shown, .. } if shown == ticket => Modal::Hidden,
            other => other,
        }
    }

    /// A call failed; the error replaces whatever is shown.
    pub fn failed(self, message: impl Into<String>) -> Self {
        Modal::Error { message: message.into() }
    }

    pub fn dismissed(self) -> Self {
        Modal::Hidden
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Modal::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_hides_own_spinner() {
        assert_eq!(Modal::loading(1).succeeded(1), Modal::Hidden);
    }

    #[test]
    fn stale_success_keeps_newer_spinner() {
        let modal = Modal::loading(2);
        assert_eq!(modal.clone().succeeded(1), modal);
    }

    #[test]
    fn failure_then_dismiss_returns_to_hidden() {
        let modal = Modal::loading(1).failed("API error: 500 Internal Server Error");
        assert!(modal.is_visible());
        assert!(matches!(&modal, Modal::Error { message } if message.contains("500")));
        assert_eq!(modal.dismissed(), Modal::Hidden);
    }

    #[test]
    fn success_does_not_clear_shown_error() {
        let modal = Modal::Hidden.failed("boom");
        assert_eq!(modal.clone().succeeded(3), modal);
    }
}
