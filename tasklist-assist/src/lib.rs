//! # tasklist-assist
//!
//! Subtask generation: builds the prompt, calls the remote `generateContent`
//! endpoint and validates the constrained JSON reply.
//!
//! - [`client`] — [`SubtaskGenerator`] and the `ureq`-backed [`GeminiClient`]
//! - [`wire`] — request/response bodies and [`parse_response`]
//! - [`prompt`] — [`build_prompt`]

pub mod client;
pub mod error;
pub mod prompt;
pub mod wire;

pub use client::{GeminiClient, SubtaskGenerator};
pub use error::GenerateError;
pub use prompt::build_prompt;
pub use wire::{parse_response, GenerateRequest};
