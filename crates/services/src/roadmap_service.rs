use std::sync::Arc;

use rand::Rng;
use resolution_core::model::{AssignmentId, Roadmap, UserIdentity, Weekend};
use storage::repository::{RoadmapRepository, StorageError};

use crate::error::RoadmapServiceError;
use crate::Clock;

const ID_SUFFIX_LEN: usize = 9;

/// Loads and saves per-user roadmaps and mints assignment ids.
#[derive(Clone)]
pub struct RoadmapService {
    clock: Clock,
    roadmaps: Arc<dyn RoadmapRepository>,
}

impl RoadmapService {
    #[must_use]
    pub fn new(clock: Clock, roadmaps: Arc<dyn RoadmapRepository>) -> Self {
        Self { clock, roadmaps }
    }

    /// Load the user's roadmap, or the seed roadmap when nothing usable is
    /// saved.
    ///
    /// A stored blob that fails to decode is treated the same as a missing
    /// one.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError::Storage` if the repository itself fails.
    pub async fn load(&self, user: &UserIdentity) -> Result<Roadmap, RoadmapServiceError> {
        match self.roadmaps.get_roadmap(user).await {
            Ok(Some(roadmap)) => {
                tracing::debug!(%user, "loaded saved roadmap");
                Ok(roadmap)
            }
            Ok(None) => {
                tracing::debug!(%user, "no saved roadmap, starting from seed");
                Ok(Roadmap::seed())
            }
            Err(StorageError::Serialization(reason)) => {
                tracing::warn!(%user, %reason, "saved roadmap is unreadable, starting from seed");
                Ok(Roadmap::seed())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Persist the whole roadmap for the user.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError::Storage` if persistence fails.
    pub async fn save(
        &self,
        user: &UserIdentity,
        roadmap: &Roadmap,
    ) -> Result<(), RoadmapServiceError> {
        self.roadmaps.save_roadmap(user, roadmap).await?;
        Ok(())
    }

    /// Identities with a saved roadmap.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError::Storage` if repository access fails.
    pub async fn list_users(&self) -> Result<Vec<UserIdentity>, RoadmapServiceError> {
        Ok(self.roadmaps.list_users().await?)
    }

    /// Mint an id of the form `<weekend>-<unix millis>-<9 base36 chars>` that
    /// is not yet used in `weekend`.
    #[must_use]
    pub fn new_assignment_id(&self, weekend: &Weekend) -> AssignmentId {
        let mut rng = rand::rng();
        loop {
            let suffix: String = (0..ID_SUFFIX_LEN)
                .map(|_| char::from_digit(rng.random_range(0..36), 36).unwrap_or('0'))
                .collect();
            let id = AssignmentId::new(format!(
                "{}-{}-{suffix}",
                weekend.id(),
                self.clock.now_millis()
            ));
            if !weekend.contains(&id) {
                return id;
            }
        }
    }
}
