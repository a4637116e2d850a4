use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub telegram_id: i64,
    pub chat_id: i64,
    pub created_at: String,
    pub last_active: String,
}

impl User {
    /// Creates the user on first contact, or bumps `last_active` on return visits.
    /// The boolean is true when the user was newly created.
    pub async fn create_or_touch(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
        chat_id: i64,
    ) -> Result<(Self, bool), sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        if let Some(existing) = Self::find_by_telegram_id(pool, telegram_id).await? {
            sqlx::query("UPDATE users SET last_active = ?, chat_id = ? WHERE telegram_id = ?")
                .bind(&now)
                .bind(chat_id)
                .bind(telegram_id)
                .execute(pool)
                .await?;
            return Ok((
                User {
                    last_active: now,
                    chat_id,
                    ..existing
                },
                false,
            ));
        }

        sqlx::query(
            "INSERT INTO users (telegram_id, chat_id, created_at, last_active) VALUES (?, ?, ?, ?)",
        )
        .bind(telegram_id)
        .bind(chat_id)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok((
            User {
                telegram_id,
                chat_id,
                created_at: now.clone(),
                last_active: now,
            },
            true,
        ))
    }

    pub async fn find_by_telegram_id(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT telegram_id, chat_id, created_at, last_active FROM users WHERE telegram_id = ?",
        )
        .bind(telegram_id)
        .fetch_optional(pool)
        .await
    }

    /// All known users, for the daily reflection sweep.
    pub async fn find_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT telegram_id, chat_id, created_at, last_active FROM users ORDER BY created_at",
        )
        .fetch_all(pool)
        .await
    }
}
