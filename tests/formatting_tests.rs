use growth_assistant_bot::utils::formatting::{
    format_frequency_list, format_time_ago, split_message,
};
use growth_assistant_bot::utils::markdown::escape_markdown;

#[test]
fn test_split_message_short_text_unchanged() {
    let text = "A short piece of advice.";
    let parts = split_message(text, 4096);
    assert_eq!(parts, vec![text.to_string()]);
}

#[test]
fn test_split_message_breaks_on_line_boundaries() {
    let text = "aaaaaaaaaa\nbbbbbbbbbb\ncccccccccc";
    let parts = split_message(text, 25);

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], "aaaaaaaaaa\nbbbbbbbbbb");
    assert_eq!(parts[1], "cccccccccc");
    for part in &parts {
        assert!(part.chars().count() <= 25);
    }
}

#[test]
fn test_split_message_hard_wraps_overlong_line() {
    let text = "x".repeat(100);
    let parts = split_message(&text, 30);

    assert_eq!(parts.len(), 4);
    for part in &parts[..3] {
        assert_eq!(part.chars().count(), 30);
    }
    assert_eq!(parts[3].chars().count(), 10);
    assert_eq!(parts.concat(), text);
}

#[test]
fn test_split_message_preserves_all_content() {
    let text = (0..50)
        .map(|i| format!("Line number {} with some padding text", i))
        .collect::<Vec<_>>()
        .join("\n");
    let parts = split_message(&text, 200);

    assert!(parts.len() > 1);
    let rejoined = parts.join("\n");
    assert_eq!(rejoined, text);
}

#[test]
fn test_format_frequency_list() {
    let items = vec![
        ("Anxious 😰".to_string(), 5),
        ("Hopeful 🌟".to_string(), 3),
        ("Calm 😌".to_string(), 1),
    ];

    let formatted = format_frequency_list(&items, 2);
    assert_eq!(formatted, "• Anxious 😰: 5 times\n• Hopeful 🌟: 3 times");

    let all = format_frequency_list(&items, 10);
    assert_eq!(all.lines().count(), 3);

    assert_eq!(format_frequency_list(&[], 3), "");
}

#[test]
fn test_format_time_ago() {
    assert_eq!(format_time_ago(chrono::Duration::seconds(30)), "just now");
    assert_eq!(format_time_ago(chrono::Duration::minutes(1)), "1 minute ago");
    assert_eq!(
        format_time_ago(chrono::Duration::minutes(90)),
        "1 hour, 30 minutes ago"
    );
    assert_eq!(
        format_time_ago(chrono::Duration::hours(49)),
        "2 days, 1 hour ago"
    );
}

#[test]
fn test_escape_markdown() {
    assert_eq!(escape_markdown("plain text"), "plain text");
    assert_eq!(escape_markdown("a_b*c"), "a\\_b\\*c");
    assert_eq!(escape_markdown("1. item (note)"), "1\\. item \\(note\\)");
}
