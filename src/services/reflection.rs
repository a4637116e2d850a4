use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;
use teloxide::{prelude::*, Bot};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::database::{connection::DatabaseManager, models::User};
use crate::utils::validation::validate_reflection_time;

/// Rotating reflection prompts; the day of year picks one deterministically.
pub const REFLECTION_PROMPTS: [&str; 10] = [
    "What made you smile today? 😊",
    "What's something you learned about yourself recently? 🤔",
    "What's a challenge you're facing, and how are you handling it? 💪",
    "What are you grateful for today? 🙏",
    "What's something you'd like to improve about yourself? 🎯",
    "How did you take care of yourself today? 💝",
    "What's something you're looking forward to? 🌟",
    "What's a recent accomplishment you're proud of? 🏆",
    "How have your feelings evolved throughout the day? 🎭",
    "What's something that challenged your perspective recently? 🤯",
];

pub fn prompt_of_the_day(date: NaiveDate) -> &'static str {
    REFLECTION_PROMPTS[date.ordinal0() as usize % REFLECTION_PROMPTS.len()]
}

/// Six-field cron expression for a daily job at the given UTC time.
pub fn reflection_cron(hour: u32, minute: u32) -> String {
    format!("0 {} {} * * *", minute, hour)
}

/// Sends every user a reflection prompt once a day at the configured time.
pub struct ReflectionService {
    bot: Bot,
    db: Arc<DatabaseManager>,
    scheduler: JobScheduler,
    hour: u32,
    minute: u32,
}

impl ReflectionService {
    pub async fn new(
        bot: Bot,
        db: Arc<DatabaseManager>,
        reflection_time: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let (hour, minute) = validate_reflection_time(reflection_time)?;
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            bot,
            db,
            scheduler,
            hour,
            minute,
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bot = self.bot.clone();
        let db = self.db.clone();
        let cron = reflection_cron(self.hour, self.minute);

        let reflection_job = Job::new_async(cron.as_str(), move |_uuid, _l| {
            let bot = bot.clone();
            let db = db.clone();
            Box::pin(async move {
                if let Err(e) = send_daily_reflections(bot, db).await {
                    tracing::error!("Failed to send daily reflections: {}", e);
                }
            })
        })?;

        self.scheduler.add(reflection_job).await?;
        self.scheduler.start().await?;

        tracing::info!(
            "Reflection service started - daily reminder at {:02}:{:02} UTC",
            self.hour,
            self.minute
        );
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    // Manual trigger for testing
    pub async fn send_reflections_now(
        &self,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        send_daily_reflections(self.bot.clone(), self.db.clone()).await
    }
}

async fn send_daily_reflections(
    bot: Bot,
    db: Arc<DatabaseManager>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let users = User::find_all(&db.pool).await?;
    let prompt = prompt_of_the_day(Utc::now().date_naive());

    let mut sent = 0usize;
    for user in &users {
        let text = format!(
            "✨ Daily Reflection\n\n{}\n\nTap 'Daily Reflection ✨' or 'Write in Journal 📝' \
             to capture your thoughts.",
            prompt
        );
        match bot.send_message(ChatId(user.chat_id), text).await {
            Ok(_) => sent += 1,
            Err(e) => {
                tracing::warn!(
                    "Failed to send reflection reminder to chat {}: {}",
                    user.chat_id,
                    e
                );
            }
        }
    }

    tracing::info!("Sent daily reflection reminders to {}/{} users", sent, users.len());
    Ok(())
}
