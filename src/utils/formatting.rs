/// Splits a long outbound message into chunks of at most `max_length`
/// characters, breaking on line boundaries where possible. Telegram rejects
/// messages above its limit, so every outbound advice text goes through this.
pub fn split_message(text: &str, max_length: usize) -> Vec<String> {
    if text.chars().count() <= max_length {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        // A single line longer than the limit gets hard-wrapped.
        if line.chars().count() > max_length {
            if !current.trim().is_empty() {
                parts.push(current.trim_end().to_string());
                current.clear();
            }
            let mut chunk = String::new();
            for ch in line.chars() {
                if chunk.chars().count() >= max_length {
                    parts.push(chunk.clone());
                    chunk.clear();
                }
                chunk.push(ch);
            }
            if !chunk.is_empty() {
                current = chunk;
                current.push('\n');
            }
            continue;
        }

        if current.chars().count() + line.chars().count() + 1 > max_length {
            if !current.trim().is_empty() {
                parts.push(current.trim_end().to_string());
            }
            current.clear();
        }
        current.push_str(line);
        current.push('\n');
    }

    if !current.trim().is_empty() {
        parts.push(current.trim_end().to_string());
    }

    parts
}

/// Formats frequency-counted items as bullet lines, most frequent first.
pub fn format_frequency_list(items: &[(String, usize)], limit: usize) -> String {
    items
        .iter()
        .take(limit)
        .map(|(label, count)| format!("• {}: {} times", label, count))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable "time ago" for durations, e.g. "2 days, 3 hours ago".
pub fn format_time_ago(delta: chrono::Duration) -> String {
    let days = delta.num_days();
    let hours = delta.num_hours() % 24;
    let minutes = delta.num_minutes() % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{} day{}", days, if days != 1 { "s" } else { "" }));
    }
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours != 1 { "s" } else { "" }));
    }
    if minutes > 0 {
        parts.push(format!(
            "{} minute{}",
            minutes,
            if minutes != 1 { "s" } else { "" }
        ));
    }

    if parts.is_empty() {
        return "just now".to_string();
    }

    format!("{} ago", parts.join(", "))
}
