use std::sync::Arc;

use resolution_core::model::{AppSettings, AppSettingsDraft};
use storage::repository::{AppSettingsRepository, StorageError};

use crate::error::AppSettingsServiceError;

#[derive(Clone)]
pub struct AppSettingsService {
    repo: Arc<dyn AppSettingsRepository>,
}

impl AppSettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn AppSettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted suggestion settings, or defaults if missing.
    ///
    /// A stored row that no longer validates is treated as missing, so a
    /// later `save` can overwrite it.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` if the repository itself fails.
    pub async fn load(&self) -> Result<AppSettings, AppSettingsServiceError> {
        match self.repo.get_settings().await {
            Ok(settings) => Ok(settings.unwrap_or_default()),
            Err(StorageError::Serialization(reason)) => {
                tracing::warn!(%reason, "saved settings are unreadable, using defaults");
                Ok(AppSettings::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` if validation fails or persistence fails.
    pub async fn save(
        &self,
        draft: AppSettingsDraft,
    ) -> Result<AppSettings, AppSettingsServiceError> {
        let settings = draft.validate()?;
        self.repo.save_settings(&settings).await?;
        tracing::info!(
            has_credential = settings.has_credential(),
            "suggestion settings saved"
        );
        Ok(settings)
    }
}
