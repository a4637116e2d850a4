use anyhow::{anyhow, Result};
use std::env;

use crate::utils::validation::validate_reflection_time;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub database_url: String,
    pub http_port: u16,
    pub max_message_length: usize,
    pub daily_reflection_time: String,
    pub max_situations_history: i64,
    pub max_journal_entries: i64,
    pub analysis_window_days: i64,
    pub log_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let openai_api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY must be set"))?;

        if openai_api_key.trim().is_empty() {
            return Err(anyhow!("OPENAI_API_KEY must be set"));
        }

        let openai_model = non_empty_or(env::var("OPENAI_MODEL").ok(), "gpt-4");
        let database_url = non_empty_or(env::var("DATABASE_URL").ok(), "sqlite:./data/growth.db");

        let http_port = parse_var("HTTP_PORT", 3000u16)?;
        let max_message_length = parse_var("MAX_MESSAGE_LENGTH", 4096usize)?;
        let max_situations_history = parse_var("MAX_SITUATIONS_HISTORY", 50i64)?;
        let max_journal_entries = parse_var("MAX_JOURNAL_ENTRIES", 100i64)?;
        let analysis_window_days = parse_var("ANALYSIS_WINDOW_DAYS", 7i64)?;

        if max_situations_history < 1 {
            return Err(anyhow!("MAX_SITUATIONS_HISTORY must be at least 1"));
        }
        if max_journal_entries < 1 {
            return Err(anyhow!("MAX_JOURNAL_ENTRIES must be at least 1"));
        }
        if analysis_window_days < 1 {
            return Err(anyhow!("ANALYSIS_WINDOW_DAYS must be at least 1"));
        }
        if max_message_length < 64 {
            return Err(anyhow!("MAX_MESSAGE_LENGTH must be at least 64"));
        }

        let daily_reflection_time = non_empty_or(env::var("DAILY_REFLECTION_TIME").ok(), "21:00");
        validate_reflection_time(&daily_reflection_time)
            .map_err(|e| anyhow!("Invalid DAILY_REFLECTION_TIME: {}", e))?;

        let log_file = env::var("LOG_FILE").ok().filter(|v| !v.trim().is_empty());

        Ok(Config {
            telegram_bot_token: token,
            openai_api_key,
            openai_model,
            database_url,
            http_port,
            max_message_length,
            daily_reflection_time,
            max_situations_history,
            max_journal_entries,
            analysis_window_days,
            log_file,
        })
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid {}: '{}'", name, raw)),
        _ => Ok(default),
    }
}
