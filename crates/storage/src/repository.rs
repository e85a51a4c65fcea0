use async_trait::async_trait;
use resolution_core::model::{AppSettings, Roadmap, UserIdentity};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Prefix shared by every roadmap blob key.
pub const ROADMAP_KEY_PREFIX: &str = "ai_res_v3";

/// Blob key for a user's roadmap: `ai_res_v3_<identity>`.
#[must_use]
pub fn roadmap_key(user: &UserIdentity) -> String {
    format!("{ROADMAP_KEY_PREFIX}_{user}")
}

/// Serialize a roadmap into the stored JSON text.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_roadmap(roadmap: &Roadmap) -> Result<String, StorageError> {
    serde_json::to_string(roadmap).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse stored JSON text back into a roadmap.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the text is not valid JSON or does
/// not describe a well-formed ten-weekend roadmap.
pub fn decode_roadmap(payload: &str) -> Result<Roadmap, StorageError> {
    serde_json::from_str(payload).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Per-user roadmap blobs.
#[async_trait]
pub trait RoadmapRepository: Send + Sync {
    /// Fetch the saved roadmap for a user.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if a blob exists but cannot be
    /// decoded, or other storage errors.
    async fn get_roadmap(&self, user: &UserIdentity) -> Result<Option<Roadmap>, StorageError>;

    /// Replace the user's saved roadmap.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the roadmap cannot be stored.
    async fn save_roadmap(&self, user: &UserIdentity, roadmap: &Roadmap)
    -> Result<(), StorageError>;

    /// Identities that have a saved roadmap, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn list_users(&self) -> Result<Vec<UserIdentity>, StorageError>;
}

/// Single-row store for suggestion provider settings.
#[async_trait]
pub trait AppSettingsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be stored.
    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError>;
}

#[derive(Clone)]
struct StoredBlob {
    user: UserIdentity,
    payload: String,
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Roadmaps are kept as encoded JSON text, the same as the `SQLite` backend.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    blobs: Arc<Mutex<BTreeMap<String, StoredBlob>>>,
    settings: Arc<Mutex<Option<AppSettings>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under the user's key, bypassing encoding.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_raw(&self, user: &UserIdentity, payload: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            roadmap_key(user),
            StoredBlob {
                user: user.clone(),
                payload: payload.into(),
            },
        );
        Ok(())
    }

    /// Raw stored text for the user, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw(&self, user: &UserIdentity) -> Result<Option<String>, StorageError> {
        let guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&roadmap_key(user)).map(|blob| blob.payload.clone()))
    }
}

#[async_trait]
impl RoadmapRepository for InMemoryRepository {
    async fn get_roadmap(&self, user: &UserIdentity) -> Result<Option<Roadmap>, StorageError> {
        self.raw(user)?
            .map(|payload| decode_roadmap(&payload))
            .transpose()
    }

    async fn save_roadmap(
        &self,
        user: &UserIdentity,
        roadmap: &Roadmap,
    ) -> Result<(), StorageError> {
        let payload = encode_roadmap(roadmap)?;
        self.insert_raw(user, payload)
    }

    async fn list_users(&self) -> Result<Vec<UserIdentity>, StorageError> {
        let guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut users: Vec<UserIdentity> = guard.values().map(|blob| blob.user.clone()).collect();
        users.sort();
        Ok(users)
    }
}

#[async_trait]
impl AppSettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        let guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub roadmaps: Arc<dyn RoadmapRepository>,
    pub app_settings: Arc<dyn AppSettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let roadmaps: Arc<dyn RoadmapRepository> = Arc::new(repo.clone());
        let app_settings: Arc<dyn AppSettingsRepository> = Arc::new(repo);
        Self {
            roadmaps,
            app_settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resolution_core::model::{Assignment, AssignmentId, WeekendId};

    fn user(name: &str) -> UserIdentity {
        UserIdentity::new(name).unwrap()
    }

    #[test]
    fn key_uses_fixed_prefix() {
        assert_eq!(roadmap_key(&user("ada@example.com")), "ai_res_v3_ada@example.com");
    }

    #[tokio::test]
    async fn round_trips_roadmap_per_user() {
        let repo = InMemoryRepository::new();
        let ada = user("ada");
        let mut roadmap = Roadmap::seed();
        roadmap.add_assignment(
            WeekendId::first(),
            Assignment::new(AssignmentId::new("1-1-a"), "Setup", "Install tools"),
        );

        repo.save_roadmap(&ada, &roadmap).await.unwrap();

        assert_eq!(repo.get_roadmap(&ada).await.unwrap(), Some(roadmap));
        assert_eq!(repo.get_roadmap(&user("grace")).await.unwrap(), None);
        assert_eq!(repo.list_users().await.unwrap(), vec![ada]);
    }

    #[tokio::test]
    async fn corrupt_blob_is_a_serialization_error() {
        let repo = InMemoryRepository::new();
        let ada = user("ada");
        repo.insert_raw(&ada, "{not json").unwrap();

        let err = repo.get_roadmap(&ada).await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn wrong_shape_blob_is_a_serialization_error() {
        let repo = InMemoryRepository::new();
        let ada = user("ada");
        repo.insert_raw(&ada, r#"[{"id":1,"title":"only one","assignments":[]}]"#)
            .unwrap();

        assert!(matches!(
            repo.get_roadmap(&ada).await,
            Err(StorageError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn settings_start_empty_and_persist() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.get_settings().await.unwrap(), None);

        let settings = AppSettings::from_persisted(Some("key".into()), None, None).unwrap();
        repo.save_settings(&settings).await.unwrap();
        assert_eq!(repo.get_settings().await.unwrap(), Some(settings));
    }
}
