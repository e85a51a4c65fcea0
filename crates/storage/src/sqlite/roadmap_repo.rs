use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{
    RoadmapRepository, StorageError, decode_roadmap, encode_roadmap, roadmap_key,
};
use resolution_core::model::{Roadmap, UserIdentity};

use super::SqliteRepository;

#[async_trait]
impl RoadmapRepository for SqliteRepository {
    async fn get_roadmap(&self, user: &UserIdentity) -> Result<Option<Roadmap>, StorageError> {
        let key = roadmap_key(user);
        let row = sqlx::query("SELECT payload FROM roadmap_blobs WHERE storage_key = ?1")
            .bind(&key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            tracing::debug!(key, "no saved roadmap");
            return Ok(None);
        };

        let payload: String = row
            .try_get("payload")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        decode_roadmap(&payload).map(Some)
    }

    async fn save_roadmap(
        &self,
        user: &UserIdentity,
        roadmap: &Roadmap,
    ) -> Result<(), StorageError> {
        let key = roadmap_key(user);
        let payload = encode_roadmap(roadmap)?;

        sqlx::query(
            r"
            INSERT INTO roadmap_blobs (storage_key, user_identity, payload, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(storage_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(&key)
        .bind(user.as_str())
        .bind(&payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        tracing::debug!(key, bytes = payload.len(), "saved roadmap");
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserIdentity>, StorageError> {
        let rows = sqlx::query("SELECT user_identity FROM roadmap_blobs ORDER BY user_identity")
            .fetch_all(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        rows.iter()
            .map(|row| {
                let raw: String = row
                    .try_get("user_identity")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;
                UserIdentity::new(raw).map_err(|err| StorageError::Serialization(err.to_string()))
            })
            .collect()
    }
}
