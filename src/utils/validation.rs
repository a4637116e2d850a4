use anyhow::{anyhow, Result};

pub fn validate_topic(topic: &str) -> Result<()> {
    let topic = topic.trim();

    if topic.is_empty() {
        return Err(anyhow!("Topic cannot be empty"));
    }

    if topic.len() < 3 {
        return Err(anyhow!("Topic must be at least 3 characters long"));
    }

    if topic.len() > 255 {
        return Err(anyhow!("Topic cannot be longer than 255 characters"));
    }

    if topic.contains('\n') || topic.contains('\r') {
        return Err(anyhow!("Topic cannot contain line breaks"));
    }

    Ok(())
}

/// Validates free-text input (situation descriptions, journal entries,
/// resolution notes). Telegram caps inbound messages at 4096 characters,
/// so the upper bound mostly guards against pasted walls of text.
pub fn validate_free_text(text: &str) -> Result<()> {
    let text = text.trim();

    if text.is_empty() {
        return Err(anyhow!("Text cannot be empty"));
    }

    if text.chars().count() > 4000 {
        return Err(anyhow!("Text cannot be longer than 4000 characters"));
    }

    Ok(())
}

pub fn validate_mood_rating(rating: i64) -> Result<()> {
    if !(1..=10).contains(&rating) {
        return Err(anyhow!("Mood rating must be between 1 and 10"));
    }
    Ok(())
}

/// Parses and validates a `HH:MM` daily reflection time. Returns (hour, minute).
pub fn validate_reflection_time(time: &str) -> Result<(u32, u32)> {
    let time = time.trim();

    let (hour_str, minute_str) = time
        .split_once(':')
        .ok_or_else(|| anyhow!("Time must be in HH:MM format"))?;

    let hour: u32 = hour_str
        .parse()
        .map_err(|_| anyhow!("Invalid hour '{}'", hour_str))?;
    let minute: u32 = minute_str
        .parse()
        .map_err(|_| anyhow!("Invalid minute '{}'", minute_str))?;

    if hour > 23 {
        return Err(anyhow!("Hour must be between 0 and 23"));
    }
    if minute > 59 {
        return Err(anyhow!("Minute must be between 0 and 59"));
    }

    Ok((hour, minute))
}

pub fn validate_telegram_chat_id(chat_id: i64) -> Result<()> {
    // Telegram chat IDs should be non-zero
    if chat_id == 0 {
        return Err(anyhow!("Chat ID cannot be zero"));
    }

    // Positive IDs should be within reasonable range for user chats (up to 2^31-1)
    if chat_id > 2147483647 {
        return Err(anyhow!("Invalid user chat ID range"));
    }

    // Negative IDs belong to groups and supergroups; reject values beyond
    // Telegram's known ranges.
    if chat_id < -2000000000000 {
        return Err(anyhow!("Chat ID out of valid range"));
    }

    Ok(())
}
