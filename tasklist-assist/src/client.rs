//! [`SubtaskGenerator`] trait and its HTTP implementation.

use std::time::Instant;

use tasklist_core::Config;

use crate::error::GenerateError;
use crate::prompt::build_prompt;
use crate::wire::{parse_response, GenerateRequest};

/// Splits one task's text into an ordered list of subtasks.
///
/// Blocking; callers that must stay responsive run it on a worker.
pub trait SubtaskGenerator: Send + Sync {
    fn generate(&self, task_text: &str) -> Result<Vec<String>, GenerateError>;
}

impl<F> SubtaskGenerator for F
where
    F: Fn(&str) -> Result<Vec<String>, GenerateError> + Send + Sync,
{
    fn generate(&self, task_text: &str) -> Result<Vec<String>, GenerateError> {
        self(task_text)
    }
}

/// `generateContent` client over `ureq`.
///
/// One request per call: no retry, no explicit timeout.
pub struct GeminiClient {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        GeminiClient {
            agent: ureq::AgentBuilder::new()
                .user_agent(concat!("tasklist/", env!("CARGO_PKG_VERSION")))
                .build(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.endpoint, &config.model, config.api_key_or_empty())
    }

    /// Endpoint URL without the key query parameter.
    pub fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    fn post(&self, request: &GenerateRequest) -> Result<String, GenerateError> {
        let response = self
            .agent
            .post(&self.url())
            .query("key", &self.api_key)
            .set("Content-Type", "application/json")
            .send_json(request);

        match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| GenerateError::Transport(e.to_string())),
            Err(ureq::Error::Status(code, resp)) => Err(GenerateError::Status {
                code,
                reason: resp.status_text().to_string(),
            }),
            Err(ureq::Error::Transport(t)) => Err(GenerateError::Transport(t.to_string())),
        }
    }
}

impl SubtaskGenerator for GeminiClient {
    fn generate(&self, task_text: &str) -> Result<Vec<String>, GenerateError> {
        let started = Instant::now();
        tracing::info!(model = %self.model, chars = task_text.chars().count(), "requesting subtasks");

        let request = GenerateRequest::for_prompt(build_prompt(task_text));
        let result = self.post(&request).and_then(|body| parse_response(&body));

        let elapsed_ms = started.elapsed().as_millis();
        match &result {
            Ok(items) => tracing::info!(count = items.len(), elapsed_ms, "subtasks received"),
            Err(err) => tracing::warn!(error = %err, elapsed_ms, "subtask generation failed"),
        }
        result
    }
}
