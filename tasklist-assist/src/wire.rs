//! Request and response bodies of the `generateContent` endpoint, and the
//! response parser.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::GenerateError;

/// Name of the array field the model is asked to fill.
pub const SUBTASKS_FIELD: &str = "subtarefas";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl GenerateRequest {
    /// A single user turn carrying `prompt`, constrained to the subtask schema.
    pub fn for_prompt(prompt: String) -> Self {
        GenerateRequest {
            contents: vec![Content { role: "user".to_string(), parts: vec![Part { text: prompt }] }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: subtask_schema(),
            },
        }
    }
}

fn subtask_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            SUBTASKS_FIELD: { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": [SUBTASKS_FIELD]
    })
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubtaskList {
    subtarefas: Vec<String>,
}

/// Extract the subtask list from a raw success body.
///
/// Nothing is returned unless the whole shape checks out; there is no
/// partial result.
pub fn parse_response(body: &str) -> Result<Vec<String>, GenerateError> {
    let envelope: GenerateResponse =
        serde_json::from_str(body).map_err(|_| GenerateError::InvalidResponse)?;
    let text = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or(GenerateError::InvalidResponse)?;

    let list: SubtaskList = serde_json::from_str(&text).map_err(GenerateError::Malformed)?;
    if list.subtarefas.is_empty() {
        return Err(GenerateError::NoSubtasks);
    }
    Ok(list.subtarefas)
}
