use std::sync::Arc;

use resolution_core::model::UserIdentity;
use storage::repository::Storage;

use crate::Clock;
use crate::app_settings_service::AppSettingsService;
use crate::error::{AppServicesError, RoadmapServiceError};
use crate::roadmap_service::RoadmapService;
use crate::roadmap_session::RoadmapSession;
use crate::suggestions::{SuggestionConfig, SuggestionGateway};

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    roadmaps: Arc<RoadmapService>,
    app_settings: Arc<AppSettingsService>,
    suggestions: SuggestionGateway,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock, suggestions: SuggestionGateway) -> Self {
        Self {
            roadmaps: Arc::new(RoadmapService::new(clock, Arc::clone(&storage.roadmaps))),
            app_settings: Arc::new(AppSettingsService::new(Arc::clone(&storage.app_settings))),
            suggestions,
        }
    }

    /// Build services over `storage`, choosing the suggestion provider from
    /// persisted settings overlaid with the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the settings cannot be read.
    pub async fn from_storage(storage: &Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let settings = AppSettingsService::new(Arc::clone(&storage.app_settings))
            .load()
            .await?;
        let config = SuggestionConfig::from_env(&settings);
        Ok(Self::new(storage, clock, SuggestionGateway::from_config(config)))
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or settings lookup fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, clock).await
    }

    /// Open a session on the given user's roadmap.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError` if the roadmap cannot be read.
    pub async fn open_session(
        &self,
        user: UserIdentity,
    ) -> Result<RoadmapSession, RoadmapServiceError> {
        RoadmapSession::open(Arc::clone(&self.roadmaps), user).await
    }

    #[must_use]
    pub fn roadmaps(&self) -> Arc<RoadmapService> {
        Arc::clone(&self.roadmaps)
    }

    #[must_use]
    pub fn app_settings(&self) -> Arc<AppSettingsService> {
        Arc::clone(&self.app_settings)
    }

    #[must_use]
    pub fn suggestions(&self) -> &SuggestionGateway {
        &self.suggestions
    }
}
