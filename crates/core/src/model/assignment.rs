use serde::{Deserialize, Serialize};

use crate::model::ids::AssignmentId;

/// Title given to assignments created without one.
pub const DEFAULT_ASSIGNMENT_TITLE: &str = "New Assignment";

/// Description given to assignments created without one.
pub const DEFAULT_ASSIGNMENT_DESCRIPTION: &str = "Click to edit description";

/// A user-tracked task inside a weekend.
///
/// The serialized shape (camelCase, `timeSpent` in minutes) is the persisted
/// blob format and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    id: AssignmentId,
    title: String,
    description: String,
    completed: bool,
    notes: String,
    time_spent: u32,
}

impl Assignment {
    /// Creates an open assignment with no notes and no time logged.
    #[must_use]
    pub fn new(id: AssignmentId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
            notes: String::new(),
            time_spent: 0,
        }
    }

    /// Creates an assignment using the default title and description.
    #[must_use]
    pub fn with_defaults(id: AssignmentId) -> Self {
        Self::new(id, DEFAULT_ASSIGNMENT_TITLE, DEFAULT_ASSIGNMENT_DESCRIPTION)
    }

    #[must_use]
    pub fn id(&self) -> &AssignmentId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Minutes spent on the assignment.
    #[must_use]
    pub fn time_spent(&self) -> u32 {
        self.time_spent
    }

    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub(crate) fn apply(&mut self, patch: AssignmentPatch) {
        let AssignmentPatch {
            title,
            description,
            notes,
            time_spent,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(notes) = notes {
            self.notes = notes;
        }
        if let Some(minutes) = time_spent {
            self.time_spent = minutes;
        }
    }
}

/// Partial update for an assignment. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub time_spent: Option<u32>,
}

impl AssignmentPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn time_spent(mut self, minutes: u32) -> Self {
        self.time_spent = Some(minutes);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.notes.is_none()
            && self.time_spent.is_none()
    }
}
