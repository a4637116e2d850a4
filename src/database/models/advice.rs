use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Advice {
    pub id: String,
    pub situation_id: String,
    pub advice: String,
    pub created_at: String,
    /// None until the user rates the advice.
    pub was_helpful: Option<bool>,
}

impl Advice {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        situation_id: String,
        advice: String,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO advice (id, situation_id, advice, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&situation_id)
        .bind(&advice)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(Advice {
            id,
            situation_id,
            advice,
            created_at: now,
            was_helpful: None,
        })
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        advice_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Advice>(
            "SELECT id, situation_id, advice, created_at, was_helpful FROM advice WHERE id = ?",
        )
        .bind(advice_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_latest_for_situation(
        pool: &sqlx::SqlitePool,
        situation_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Advice>(
            "SELECT id, situation_id, advice, created_at, was_helpful
             FROM advice WHERE situation_id = ? ORDER BY created_at DESC LIMIT 1",
        )
        .bind(situation_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn set_helpful(
        pool: &sqlx::SqlitePool,
        advice_id: &str,
        was_helpful: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE advice SET was_helpful = ? WHERE id = ?")
            .bind(was_helpful)
            .bind(advice_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
