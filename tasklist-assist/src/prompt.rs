//! Prompt sent to the model.

use crate::wire::SUBTASKS_FIELD;

/// Instruction asking for 3–5 actionable subtasks as `{"subtarefas": [...]}`.
pub fn build_prompt(task_text: &str) -> String {
    format!(
        "You are an expert productivity assistant. Break the main task below into \
         a list of 3 to 5 concise, actionable subtasks. Reply ONLY with a JSON \
         object containing a single key \"{SUBTASKS_FIELD}\" whose value is an \
         array of strings. Main task: \"{task_text}\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_field_and_task() {
        let prompt = build_prompt("Plan trip");
        assert!(prompt.contains("\"subtarefas\""));
        assert!(prompt.contains("3 to 5"));
        assert!(prompt.ends_with("Main task: \"Plan trip\""));
    }
}
