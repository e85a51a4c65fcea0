use resolution_core::model::WeekendId;
use serde_json::{Value, json};

/// Bounds on the number of suggested tasks, declared in the schema and
/// re-checked when the reply is parsed.
pub const MIN_TASKS: usize = 2;
pub const MAX_TASKS: usize = 3;

const EMPTY_HISTORY: &str = "No tasks completed yet.";

/// Name reported for the structured output schema.
pub const SCHEMA_NAME: &str = "weekend_suggestion";

/// The coaching instruction sent to the model.
#[must_use]
pub fn build_prompt(progress_summary: &str, target: WeekendId) -> String {
    let history = if progress_summary.trim().is_empty() {
        EMPTY_HISTORY
    } else {
        progress_summary
    };
    format!(
        "You are an expert AI learning coach. The user is on a 10-weekend AI resolution journey.\n\
         They have finished some tasks and are now planning Weekend #{target}.\n\
         \n\
         Progress History:\n\
         {history}\n\
         \n\
         Based on their history (or starting fresh if empty), suggest exactly 2-3 specific assignments for Weekend #{target}.\n\
         Make the titles concise and descriptions actionable."
    )
}

/// JSON schema the response must match.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "suggestedTasks": {
                "type": "array",
                "description": "A list of 2-3 specific assignments for the next weekend",
                "minItems": MIN_TASKS,
                "maxItems": MAX_TASKS,
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" }
                    },
                    "required": ["title", "description"],
                    "additionalProperties": false
                }
            },
            "reasoning": {
                "type": "string",
                "description": "Briefly explain the focus of this suggested weekend curriculum"
            }
        },
        "required": ["suggestedTasks", "reasoning"],
        "additionalProperties": false
    })
}
