use serde::{Deserialize, Serialize};

use crate::model::weekend::Weekend;

/// One candidate assignment proposed for a weekend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTask {
    pub title: String,
    pub description: String,
}

impl SuggestedTask {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Suggested curriculum for one weekend, as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub suggested_tasks: Vec<SuggestedTask>,
    pub reasoning: String,
}

impl Suggestion {
    /// The fixed payload served whenever a real suggestion is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            suggested_tasks: vec![
                SuggestedTask::new(
                    "Foundational API Setup",
                    "Connect to Gemini API and create a basic prompt interface.",
                ),
                SuggestedTask::new(
                    "Response Parsing",
                    "Implement structured JSON output handling.",
                ),
            ],
            reasoning: "Starting with the basics of LLM integration.".to_string(),
        }
    }
}

/// Renders completed work as one line per weekend:
/// `Weekend <id> (<title>): <task>: <notes>, ...`.
///
/// Only completed assignments are listed. Returns an empty string when
/// `history` is empty.
#[must_use]
pub fn progress_summary(history: &[&Weekend]) -> String {
    history
        .iter()
        .map(|weekend| {
            let done: Vec<String> = weekend
                .assignments()
                .iter()
                .filter(|a| a.is_completed())
                .map(|a| format!("{}: {}", a.title(), a.notes()))
                .collect();
            format!(
                "Weekend {} ({}): {}",
                weekend.id(),
                weekend.title(),
                done.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assignment, AssignmentId, AssignmentPatch, Roadmap, WeekendId};

    #[test]
    fn fallback_has_two_fixed_tasks() {
        let fallback = Suggestion::fallback();
        assert_eq!(fallback.suggested_tasks.len(), 2);
        assert_eq!(fallback.suggested_tasks[0].title, "Foundational API Setup");
        assert_eq!(fallback.suggested_tasks[1].title, "Response Parsing");
        assert_eq!(fallback.reasoning, "Starting with the basics of LLM integration.");
    }

    #[test]
    fn parses_camel_case_payload() {
        let raw = r#"{"suggestedTasks":[{"title":"A","description":"B"}],"reasoning":"R"}"#;
        let parsed: Suggestion = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.suggested_tasks, vec![SuggestedTask::new("A", "B")]);
        assert_eq!(parsed.reasoning, "R");
    }

    #[test]
    fn summary_lists_completed_work_with_notes() {
        let mut roadmap = Roadmap::seed();
        let w1 = WeekendId::first();
        for (id, title, notes) in [("a", "Setup", "used venv"), ("b", "Hello LLM", ""), ("c", "Open", "")] {
            let id = AssignmentId::new(id);
            roadmap.add_assignment(w1, Assignment::new(id.clone(), title, ""));
            roadmap.update_assignment(w1, &id, AssignmentPatch::new().notes(notes));
        }
        roadmap.toggle_assignment(w1, &AssignmentId::new("a"));
        roadmap.toggle_assignment(w1, &AssignmentId::new("b"));

        let summary = progress_summary(&roadmap.history());
        assert_eq!(
            summary,
            "Weekend 1 (Foundations & Setup): Setup: used venv, Hello LLM: "
        );
    }

    #[test]
    fn empty_history_renders_nothing() {
        assert_eq!(progress_summary(&[]), "");
    }
}
