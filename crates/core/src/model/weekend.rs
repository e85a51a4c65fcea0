use serde::{Deserialize, Serialize};

use crate::model::assignment::Assignment;
use crate::model::ids::{AssignmentId, WeekendId};

/// One period of the roadmap and its assignments, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weekend {
    id: WeekendId,
    title: String,
    #[serde(default)]
    assignments: Vec<Assignment>,
}

impl Weekend {
    #[must_use]
    pub fn new(id: WeekendId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            assignments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_assignments(mut self, assignments: Vec<Assignment>) -> Self {
        self.assignments = assignments;
        self
    }

    #[must_use]
    pub fn id(&self) -> WeekendId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    #[must_use]
    pub fn assignment(&self, id: &AssignmentId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &AssignmentId) -> bool {
        self.assignment(id).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// A weekend is done when it has at least one assignment and every
    /// assignment is completed. An empty weekend is never done.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.assignments.is_empty() && self.assignments.iter().all(Assignment::is_completed)
    }

    /// True when at least one assignment is completed.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.assignments.iter().any(Assignment::is_completed)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_completed()).count()
    }

    /// Total minutes logged across all assignments.
    #[must_use]
    pub fn time_spent(&self) -> u64 {
        self.assignments
            .iter()
            .map(|a| u64::from(a.time_spent()))
            .sum()
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn push(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    pub(crate) fn remove(&mut self, id: &AssignmentId) -> Option<Assignment> {
        let index = self.assignments.iter().position(|a| a.id() == id)?;
        Some(self.assignments.remove(index))
    }

    pub(crate) fn assignment_mut(&mut self, id: &AssignmentId) -> Option<&mut Assignment> {
        self.assignments.iter_mut().find(|a| a.id() == id)
    }

    pub(crate) fn first_duplicate_id(&self) -> Option<&AssignmentId> {
        self.assignments
            .iter()
            .enumerate()
            .find(|(index, a)| self.assignments[..*index].iter().any(|b| b.id() == a.id()))
            .map(|(_, a)| a.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekend_with(states: &[bool]) -> Weekend {
        let assignments = states
            .iter()
            .enumerate()
            .map(|(index, done)| {
                let mut a = Assignment::new(AssignmentId::new(format!("a{index}")), "T", "D");
                if *done {
                    a.toggle();
                }
                a
            })
            .collect();
        Weekend::new(WeekendId::first(), "Basics").with_assignments(assignments)
    }

    #[test]
    fn empty_weekend_is_never_complete() {
        let weekend = weekend_with(&[]);
        assert!(weekend.assignments().iter().all(Assignment::is_completed));
        assert!(!weekend.is_complete());
    }

    #[test]
    fn partially_done_weekend_is_not_complete() {
        let weekend = weekend_with(&[true, false]);
        assert!(!weekend.is_complete());
        assert!(weekend.has_progress());
        assert_eq!(weekend.completed_count(), 1);
    }

    #[test]
    fn fully_done_weekend_is_complete() {
        assert!(weekend_with(&[true, true]).is_complete());
    }

    #[test]
    fn detects_duplicate_assignment_ids() {
        let a = Assignment::new(AssignmentId::new("dup"), "A", "");
        let b = Assignment::new(AssignmentId::new("dup"), "B", "");
        let weekend = Weekend::new(WeekendId::first(), "x").with_assignments(vec![a, b]);
        assert_eq!(weekend.first_duplicate_id(), Some(&AssignmentId::new("dup")));
        assert_eq!(weekend_with(&[false, false]).first_duplicate_id(), None);
    }
}
