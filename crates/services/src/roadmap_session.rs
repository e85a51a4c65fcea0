use std::sync::Arc;

use resolution_core::model::{
    Assignment, AssignmentId, AssignmentPatch, DEFAULT_ASSIGNMENT_DESCRIPTION,
    DEFAULT_ASSIGNMENT_TITLE, MutationOutcome, Roadmap, RoadmapStats, UserIdentity, WeekendId,
};

use crate::error::RoadmapServiceError;
use crate::roadmap_service::RoadmapService;
use crate::suggestions::SuggestionGateway;

/// Result of asking for suggestions on a weekend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    /// Suggested tasks were appended to the weekend.
    Added {
        reasoning: String,
        assignments: Vec<AssignmentId>,
    },
    /// A request for this weekend is already running.
    InFlight,
    /// Suggestions only fill empty weekends.
    NotEmpty,
}

/// The active user's roadmap plus the view state around it.
///
/// Every mutator applies to the in-memory roadmap first and writes the whole
/// roadmap back when something changed.
pub struct RoadmapSession {
    service: Arc<RoadmapService>,
    user: UserIdentity,
    roadmap: Roadmap,
    expanded: Option<WeekendId>,
}

impl RoadmapSession {
    /// Start a session for `user`, loading their saved roadmap or the seed.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError` if the repository fails.
    pub async fn open(
        service: Arc<RoadmapService>,
        user: UserIdentity,
    ) -> Result<Self, RoadmapServiceError> {
        let roadmap = service.load(&user).await?;
        Ok(Self {
            service,
            user,
            roadmap,
            expanded: Some(WeekendId::first()),
        })
    }

    /// Swap in another user's roadmap.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError` if the repository fails; the current
    /// session is left untouched in that case.
    pub async fn switch_user(&mut self, user: UserIdentity) -> Result<(), RoadmapServiceError> {
        let roadmap = self.service.load(&user).await?;
        tracing::debug!(from = %self.user, to = %user, "switching user");
        self.user = user;
        self.roadmap = roadmap;
        self.expanded = Some(WeekendId::first());
        Ok(())
    }

    #[must_use]
    pub fn user(&self) -> &UserIdentity {
        &self.user
    }

    #[must_use]
    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    #[must_use]
    pub fn stats(&self) -> RoadmapStats {
        self.roadmap.stats()
    }

    #[must_use]
    pub fn expanded(&self) -> Option<WeekendId> {
        self.expanded
    }

    /// Expand `weekend`, or collapse it if it is already the expanded one.
    pub fn toggle_expanded(&mut self, weekend: WeekendId) {
        self.expanded = if self.expanded == Some(weekend) {
            None
        } else {
            Some(weekend)
        };
    }

    pub fn expand(&mut self, weekend: WeekendId) {
        self.expanded = Some(weekend);
    }

    /// Append a new assignment, using the default title/description where
    /// none is given. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError` if saving fails.
    pub async fn add_assignment(
        &mut self,
        weekend: WeekendId,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Option<AssignmentId>, RoadmapServiceError> {
        let Some(target) = self.roadmap.weekend(weekend) else {
            return Ok(None);
        };
        let id = self.service.new_assignment_id(target);
        let assignment = Assignment::new(
            id.clone(),
            title.unwrap_or_else(|| DEFAULT_ASSIGNMENT_TITLE.to_string()),
            description.unwrap_or_else(|| DEFAULT_ASSIGNMENT_DESCRIPTION.to_string()),
        );
        let outcome = self.roadmap.add_assignment(weekend, assignment);
        self.persist(outcome).await?;
        Ok(outcome.is_applied().then_some(id))
    }

    /// # Errors
    ///
    /// Returns `RoadmapServiceError` if saving fails.
    pub async fn delete_assignment(
        &mut self,
        weekend: WeekendId,
        assignment: &AssignmentId,
    ) -> Result<MutationOutcome, RoadmapServiceError> {
        let outcome = self.roadmap.delete_assignment(weekend, assignment);
        self.persist(outcome).await
    }

    /// # Errors
    ///
    /// Returns `RoadmapServiceError` if saving fails.
    pub async fn toggle_assignment(
        &mut self,
        weekend: WeekendId,
        assignment: &AssignmentId,
    ) -> Result<MutationOutcome, RoadmapServiceError> {
        let outcome = self.roadmap.toggle_assignment(weekend, assignment);
        self.persist(outcome).await
    }

    /// # Errors
    ///
    /// Returns `RoadmapServiceError` if saving fails.
    pub async fn update_assignment(
        &mut self,
        weekend: WeekendId,
        assignment: &AssignmentId,
        patch: AssignmentPatch,
    ) -> Result<MutationOutcome, RoadmapServiceError> {
        let outcome = self.roadmap.update_assignment(weekend, assignment, patch);
        self.persist(outcome).await
    }

    /// # Errors
    ///
    /// Returns `RoadmapServiceError` if saving fails.
    pub async fn rename_weekend(
        &mut self,
        weekend: WeekendId,
        title: impl Into<String>,
    ) -> Result<MutationOutcome, RoadmapServiceError> {
        let outcome = self.roadmap.rename_weekend(weekend, title);
        self.persist(outcome).await
    }

    /// Ask the gateway for tasks and append each one like a manual add, then
    /// expand the weekend.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError` if saving fails. Suggestion failures are
    /// absorbed by the gateway.
    pub async fn suggest_for_weekend(
        &mut self,
        weekend: WeekendId,
        gateway: &SuggestionGateway,
    ) -> Result<SuggestOutcome, RoadmapServiceError> {
        if self.roadmap.weekend(weekend).is_some_and(|w| !w.is_empty()) {
            return Ok(SuggestOutcome::NotEmpty);
        }
        let Some(_permit) = gateway.gate().try_begin(weekend) else {
            return Ok(SuggestOutcome::InFlight);
        };

        let suggestion = gateway.suggest(&self.roadmap.history(), weekend).await;

        let mut assignments = Vec::with_capacity(suggestion.suggested_tasks.len());
        for task in suggestion.suggested_tasks {
            if let Some(id) = self
                .add_assignment(weekend, Some(task.title), Some(task.description))
                .await?
            {
                assignments.push(id);
            }
        }
        self.expand(weekend);

        Ok(SuggestOutcome::Added {
            reasoning: suggestion.reasoning,
            assignments,
        })
    }

    async fn persist(&self, outcome: MutationOutcome) -> Result<MutationOutcome, RoadmapServiceError> {
        if outcome.is_applied() {
            self.service.save(&self.user, &self.roadmap).await?;
        }
        Ok(outcome)
    }
}
