use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: i64,
    pub content: String,
    pub mood_rating: i64,
    /// JSON array of tag labels, see [`JournalEntry::tag_list`].
    pub tags: String,
    pub created_at: String,
}

impl JournalEntry {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        content: String,
        mood_rating: i64,
        tags: &[String],
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let tags_json =
            serde_json::to_string(tags).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        sqlx::query(
            r#"
            INSERT INTO journal_entries (id, user_id, content, mood_rating, tags, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&content)
        .bind(mood_rating)
        .bind(&tags_json)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(JournalEntry {
            id,
            user_id,
            content,
            mood_rating,
            tags: tags_json,
            created_at: now,
        })
    }

    pub async fn find_all_for_user(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, JournalEntry>(
            "SELECT id, user_id, content, mood_rating, tags, created_at
             FROM journal_entries WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Entries created at or after `cutoff` (RFC3339), newest first.
    /// RFC3339 strings with a fixed UTC offset order lexicographically.
    pub async fn find_since(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        cutoff: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, JournalEntry>(
            "SELECT id, user_id, content, mood_rating, tags, created_at
             FROM journal_entries WHERE user_id = ? AND created_at >= ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    /// Deletes the user's oldest entries beyond `max_entries`.
    pub async fn prune_history(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        max_entries: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM journal_entries WHERE user_id = ? AND id NOT IN (
                SELECT id FROM journal_entries WHERE user_id = ? ORDER BY created_at DESC LIMIT ?
            )
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(max_entries)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub fn tag_list(&self) -> Vec<String> {
        serde_json::from_str(&self.tags).unwrap_or_default()
    }
}
