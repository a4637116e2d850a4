use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Situation {
    pub id: String,
    pub user_id: i64,
    pub topic: String,
    pub description: String,
    pub desired_outcome: String,
    /// JSON array of emotion labels, see [`Situation::emotion_list`].
    pub emotions: String,
    pub mood_rating: i64,
    pub created_at: String,
    pub resolved_at: Option<String>,
    pub resolution: Option<String>,
}

impl Situation {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        topic: String,
        description: String,
        desired_outcome: String,
        emotions: &[String],
        mood_rating: i64,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let emotions_json =
            serde_json::to_string(emotions).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        sqlx::query(
            r#"
            INSERT INTO situations (id, user_id, topic, description, desired_outcome, emotions, mood_rating, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&topic)
        .bind(&description)
        .bind(&desired_outcome)
        .bind(&emotions_json)
        .bind(mood_rating)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(Situation {
            id,
            user_id,
            topic,
            description,
            desired_outcome,
            emotions: emotions_json,
            mood_rating,
            created_at: now,
            resolved_at: None,
            resolution: None,
        })
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        situation_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Situation>(
            "SELECT id, user_id, topic, description, desired_outcome, emotions, mood_rating, created_at, resolved_at, resolution
             FROM situations WHERE id = ?",
        )
        .bind(situation_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_recent(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Situation>(
            "SELECT id, user_id, topic, description, desired_outcome, emotions, mood_rating, created_at, resolved_at, resolution
             FROM situations WHERE user_id = ? ORDER BY created_at DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn find_unresolved(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Situation>(
            "SELECT id, user_id, topic, description, desired_outcome, emotions, mood_rating, created_at, resolved_at, resolution
             FROM situations WHERE user_id = ? AND resolved_at IS NULL ORDER BY created_at DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn find_all_for_user(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Situation>(
            "SELECT id, user_id, topic, description, desired_outcome, emotions, mood_rating, created_at, resolved_at, resolution
             FROM situations WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Marks a situation resolved with the user's resolution note.
    pub async fn resolve(
        pool: &sqlx::SqlitePool,
        situation_id: &str,
        resolution: &str,
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE situations SET resolved_at = ?, resolution = ? WHERE id = ?")
            .bind(&now)
            .bind(resolution)
            .bind(situation_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Deletes the user's oldest situations beyond `max_history`, together
    /// with any advice attached to them. Eviction is oldest-first.
    pub async fn prune_history(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        max_history: i64,
    ) -> Result<u64, sqlx::Error> {
        sqlx::query(
            r#"
            DELETE FROM advice WHERE situation_id IN (
                SELECT id FROM situations WHERE user_id = ? AND id NOT IN (
                    SELECT id FROM situations WHERE user_id = ? ORDER BY created_at DESC LIMIT ?
                )
            )
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(max_history)
        .execute(pool)
        .await?;

        let result = sqlx::query(
            r#"
            DELETE FROM situations WHERE user_id = ? AND id NOT IN (
                SELECT id FROM situations WHERE user_id = ? ORDER BY created_at DESC LIMIT ?
            )
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(max_history)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub fn emotion_list(&self) -> Vec<String> {
        serde_json::from_str(&self.emotions).unwrap_or_default()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}
