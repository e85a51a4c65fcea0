use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::assignment::{Assignment, AssignmentPatch};
use crate::model::ids::{AssignmentId, WEEKEND_COUNT, WeekendId};
use crate::model::stats::RoadmapStats;
use crate::model::weekend::Weekend;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoadmapError {
    #[error("roadmap must contain exactly 10 weekends, found {0}")]
    WrongWeekendCount(usize),

    #[error("weekend at position {position} has id {found}")]
    MisplacedWeekend { position: usize, found: WeekendId },

    #[error("weekend {weekend} contains duplicate assignment id {assignment}")]
    DuplicateAssignment {
        weekend: WeekendId,
        assignment: AssignmentId,
    },
}

/// Result of a tolerant roadmap update.
///
/// Unknown ids never fail; they simply leave the roadmap `Unchanged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    Unchanged,
}

impl MutationOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    fn from_applied(applied: bool) -> Self {
        if applied { Self::Applied } else { Self::Unchanged }
    }
}

//
// ─── SEED ──────────────────────────────────────────────────────────────────────
//

const SEED_TITLES: [&str; WEEKEND_COUNT as usize] = [
    "Foundations & Setup",
    "Prompt Engineering",
    "Working with Model APIs",
    "Embeddings & Vector Search",
    "Retrieval-Augmented Generation",
    "Agents & Tool Use",
    "Fine-Tuning Basics",
    "Evaluation & Testing",
    "Multimodal Models",
    "Capstone Project",
];

//
// ─── ROADMAP ───────────────────────────────────────────────────────────────────
//

/// The ordered collection of exactly ten weekends for one user.
///
/// Serialized as a plain JSON array of weekends; deserializing validates the
/// shape so a stored blob can never yield a roadmap with missing or shuffled
/// weekends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Weekend>", into = "Vec<Weekend>")]
pub struct Roadmap {
    weekends: Vec<Weekend>,
}

impl Roadmap {
    /// The starting roadmap: fixed titles, no assignments.
    #[must_use]
    pub fn seed() -> Self {
        let weekends = WeekendId::all()
            .zip(SEED_TITLES)
            .map(|(id, title)| Weekend::new(id, title))
            .collect();
        Self { weekends }
    }

    /// Builds a roadmap from persisted weekends.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapError` if there are not exactly ten weekends in id
    /// order, or if a weekend repeats an assignment id.
    pub fn from_weekends(weekends: Vec<Weekend>) -> Result<Self, RoadmapError> {
        if weekends.len() != usize::from(WEEKEND_COUNT) {
            return Err(RoadmapError::WrongWeekendCount(weekends.len()));
        }
        for (position, (weekend, expected)) in weekends.iter().zip(WeekendId::all()).enumerate() {
            if weekend.id() != expected {
                return Err(RoadmapError::MisplacedWeekend {
                    position,
                    found: weekend.id(),
                });
            }
            if let Some(duplicate) = weekend.first_duplicate_id() {
                return Err(RoadmapError::DuplicateAssignment {
                    weekend: weekend.id(),
                    assignment: duplicate.clone(),
                });
            }
        }
        Ok(Self { weekends })
    }

    #[must_use]
    pub fn weekends(&self) -> &[Weekend] {
        &self.weekends
    }

    #[must_use]
    pub fn weekend(&self, id: WeekendId) -> Option<&Weekend> {
        self.weekends.iter().find(|w| w.id() == id)
    }

    /// Weekends with at least one completed assignment, in roadmap order.
    #[must_use]
    pub fn history(&self) -> Vec<&Weekend> {
        self.weekends.iter().filter(|w| w.has_progress()).collect()
    }

    /// Derived statistics, recomputed on every call.
    #[must_use]
    pub fn stats(&self) -> RoadmapStats {
        RoadmapStats::from_weekends(&self.weekends)
    }

    /// Appends `assignment` to the weekend.
    ///
    /// Unchanged when the weekend is unknown or already holds an assignment
    /// with the same id.
    pub fn add_assignment(&mut self, weekend: WeekendId, assignment: Assignment) -> MutationOutcome {
        let Some(target) = self.weekend_mut(weekend) else {
            return MutationOutcome::Unchanged;
        };
        if target.contains(assignment.id()) {
            return MutationOutcome::Unchanged;
        }
        target.push(assignment);
        MutationOutcome::Applied
    }

    pub fn delete_assignment(
        &mut self,
        weekend: WeekendId,
        assignment: &AssignmentId,
    ) -> MutationOutcome {
        let removed = self
            .weekend_mut(weekend)
            .and_then(|w| w.remove(assignment))
            .is_some();
        MutationOutcome::from_applied(removed)
    }

    pub fn toggle_assignment(
        &mut self,
        weekend: WeekendId,
        assignment: &AssignmentId,
    ) -> MutationOutcome {
        match self.assignment_mut(weekend, assignment) {
            Some(found) => {
                found.toggle();
                MutationOutcome::Applied
            }
            None => MutationOutcome::Unchanged,
        }
    }

    /// Merges the provided fields into the assignment.
    ///
    /// An empty patch is reported as `Unchanged`.
    pub fn update_assignment(
        &mut self,
        weekend: WeekendId,
        assignment: &AssignmentId,
        patch: AssignmentPatch,
    ) -> MutationOutcome {
        if patch.is_empty() {
            return MutationOutcome::Unchanged;
        }
        match self.assignment_mut(weekend, assignment) {
            Some(found) => {
                found.apply(patch);
                MutationOutcome::Applied
            }
            None => MutationOutcome::Unchanged,
        }
    }

    pub fn rename_weekend(&mut self, weekend: WeekendId, title: impl Into<String>) -> MutationOutcome {
        match self.weekend_mut(weekend) {
            Some(found) => {
                found.set_title(title.into());
                MutationOutcome::Applied
            }
            None => MutationOutcome::Unchanged,
        }
    }

    fn weekend_mut(&mut self, id: WeekendId) -> Option<&mut Weekend> {
        self.weekends.iter_mut().find(|w| w.id() == id)
    }

    fn assignment_mut(
        &mut self,
        weekend: WeekendId,
        assignment: &AssignmentId,
    ) -> Option<&mut Assignment> {
        self.weekend_mut(weekend)?.assignment_mut(assignment)
    }
}

impl Default for Roadmap {
    fn default() -> Self {
        Self::seed()
    }
}

impl TryFrom<Vec<Weekend>> for Roadmap {
    type Error = RoadmapError;

    fn try_from(weekends: Vec<Weekend>) -> Result<Self, Self::Error> {
        Self::from_weekends(weekends)
    }
}

impl From<Roadmap> for Vec<Weekend> {
    fn from(roadmap: Roadmap) -> Self {
        roadmap.weekends
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wid(id: u8) -> WeekendId {
        WeekendId::new(id).unwrap()
    }

    fn add(roadmap: &mut Roadmap, weekend: u8, id: &str) -> AssignmentId {
        let assignment_id = AssignmentId::new(id);
        let outcome = roadmap.add_assignment(
            wid(weekend),
            Assignment::new(assignment_id.clone(), format!("Task {id}"), ""),
        );
        assert!(outcome.is_applied());
        assignment_id
    }

    #[test]
    fn seed_has_ten_empty_weekends_in_order() {
        let roadmap = Roadmap::seed();
        assert_eq!(roadmap.weekends().len(), 10);
        for (weekend, expected) in roadmap.weekends().iter().zip(1..=10) {
            assert_eq!(weekend.id().value(), expected);
            assert!(weekend.is_empty());
        }
        assert_eq!(roadmap.stats().timeline_percentage(), 0);
    }

    #[test]
    fn add_then_delete_restores_the_weekend() {
        let mut roadmap = Roadmap::seed();
        add(&mut roadmap, 2, "existing");
        let before = roadmap.weekend(wid(2)).unwrap().clone();

        let id = add(&mut roadmap, 2, "temp");
        assert_eq!(roadmap.weekend(wid(2)).unwrap().assignments().len(), 2);
        assert!(roadmap.delete_assignment(wid(2), &id).is_applied());

        assert_eq!(roadmap.weekend(wid(2)).unwrap(), &before);
    }

    #[test]
    fn add_with_duplicate_id_is_ignored() {
        let mut roadmap = Roadmap::seed();
        add(&mut roadmap, 1, "same");
        let outcome = roadmap.add_assignment(
            wid(1),
            Assignment::new(AssignmentId::new("same"), "Other", ""),
        );
        assert_eq!(outcome, MutationOutcome::Unchanged);
        assert_eq!(roadmap.weekend(wid(1)).unwrap().assignments().len(), 1);
    }

    #[test]
    fn double_toggle_restores_completion() {
        let mut roadmap = Roadmap::seed();
        let id = add(&mut roadmap, 1, "a");
        roadmap.toggle_assignment(wid(1), &id);
        assert!(roadmap.weekend(wid(1)).unwrap().assignment(&id).unwrap().is_completed());
        roadmap.toggle_assignment(wid(1), &id);
        assert!(!roadmap.weekend(wid(1)).unwrap().assignment(&id).unwrap().is_completed());
    }

    #[test]
    fn unknown_ids_are_silent_no_ops() {
        let mut roadmap = Roadmap::seed();
        add(&mut roadmap, 1, "a");
        let before = roadmap.clone();
        let missing = AssignmentId::new("missing");

        assert_eq!(roadmap.delete_assignment(wid(1), &missing), MutationOutcome::Unchanged);
        assert_eq!(roadmap.toggle_assignment(wid(3), &missing), MutationOutcome::Unchanged);
        assert_eq!(
            roadmap.update_assignment(wid(1), &missing, AssignmentPatch::new().title("x")),
            MutationOutcome::Unchanged
        );
        assert_eq!(roadmap, before);
    }

    #[test]
    fn empty_patch_leaves_assignment_unchanged() {
        let mut roadmap = Roadmap::seed();
        let id = add(&mut roadmap, 4, "a");
        let before = roadmap.clone();
        let outcome = roadmap.update_assignment(wid(4), &id, AssignmentPatch::new());
        assert_eq!(outcome, MutationOutcome::Unchanged);
        assert_eq!(roadmap, before);
    }

    #[test]
    fn rename_sets_the_title() {
        let mut roadmap = Roadmap::seed();
        assert!(roadmap.rename_weekend(wid(5), "RAG deep dive").is_applied());
        assert_eq!(roadmap.weekend(wid(5)).unwrap().title(), "RAG deep dive");
    }

    #[test]
    fn completing_last_assignment_marks_weekend_done() {
        let mut roadmap = Roadmap::seed();
        let first = add(&mut roadmap, 1, "first");
        let second = add(&mut roadmap, 1, "second");
        roadmap.toggle_assignment(wid(1), &first);

        let stats = roadmap.stats();
        assert_eq!(stats.tasks_done(), 1);
        assert!(stats.total_tasks() >= 1);
        assert_eq!(stats.weekends_done(), 0);
        assert_eq!(stats.timeline_percentage(), 0);

        roadmap.toggle_assignment(wid(1), &second);
        let stats = roadmap.stats();
        assert_eq!(stats.weekends_done(), 1);
        assert_eq!(stats.timeline_percentage(), 10);
    }

    #[test]
    fn history_only_includes_weekends_with_completed_work() {
        let mut roadmap = Roadmap::seed();
        let done = add(&mut roadmap, 1, "done");
        add(&mut roadmap, 2, "open");
        roadmap.toggle_assignment(wid(1), &done);

        let history: Vec<u8> = roadmap.history().iter().map(|w| w.id().value()).collect();
        assert_eq!(history, vec![1]);
    }

    #[test]
    fn json_round_trip_uses_plain_weekend_array() {
        let mut roadmap = Roadmap::seed();
        add(&mut roadmap, 1, "a");
        let json = serde_json::to_value(&roadmap).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["assignments"][0]["timeSpent"], 0);

        let back: Roadmap = serde_json::from_value(json).unwrap();
        assert_eq!(back, roadmap);
    }

    #[test]
    fn rejects_malformed_weekend_lists() {
        let mut weekends: Vec<Weekend> = Roadmap::seed().into();
        weekends.pop();
        assert_eq!(
            Roadmap::from_weekends(weekends.clone()),
            Err(RoadmapError::WrongWeekendCount(9))
        );

        weekends.insert(0, Weekend::new(wid(10), "late"));
        assert!(matches!(
            Roadmap::from_weekends(weekends),
            Err(RoadmapError::MisplacedWeekend { position: 0, .. })
        ));
    }

    #[test]
    fn rejects_repeated_assignment_ids_within_a_weekend() {
        let mut weekends: Vec<Weekend> = Roadmap::seed().into();
        let repeated = AssignmentId::new("3-1700000000000-aaaaaaaaa");
        weekends[2] = weekends[2].clone().with_assignments(vec![
            Assignment::new(repeated.clone(), "First", ""),
            Assignment::new(repeated.clone(), "Second", ""),
        ]);

        assert_eq!(
            Roadmap::from_weekends(weekends.clone()),
            Err(RoadmapError::DuplicateAssignment {
                weekend: wid(3),
                assignment: repeated,
            })
        );

        let json = serde_json::to_string(&weekends).unwrap();
        assert!(serde_json::from_str::<Roadmap>(&json).is_err());
    }

    #[test]
    fn same_assignment_id_in_different_weekends_is_allowed() {
        let mut weekends: Vec<Weekend> = Roadmap::seed().into();
        let shared = AssignmentId::new("shared");
        weekends[0] = weekends[0]
            .clone()
            .with_assignments(vec![Assignment::new(shared.clone(), "A", "")]);
        weekends[1] = weekends[1]
            .clone()
            .with_assignments(vec![Assignment::new(shared, "B", "")]);

        assert!(Roadmap::from_weekends(weekends).is_ok());
    }
}
