//! Shared error types for the services crate.

use thiserror::Error;

use resolution_core::model::AppSettingsError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Failures of a suggestion provider. The gateway absorbs all of them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SuggestionError {
    #[error("suggestion provider is not configured")]
    Disabled,
    #[error("suggestion provider returned an empty response")]
    EmptyResponse,
    #[error("suggestion request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("suggestion response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("suggestion response violates the schema: {0}")]
    Schema(String),
}

/// Errors emitted by `RoadmapService` and `RoadmapSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoadmapServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AppSettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppSettingsServiceError {
    #[error(transparent)]
    Settings(#[from] AppSettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Settings(#[from] AppSettingsServiceError),
}
