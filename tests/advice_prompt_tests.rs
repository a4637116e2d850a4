use chrono::Utc;
use growth_assistant_bot::database::models::{JournalEntry, Situation};
use growth_assistant_bot::services::advice::{build_situation_prompt, mask_token, FALLBACK_ADVICE};

fn make_situation() -> Situation {
    let emotions = vec!["Anxious 😰".to_string(), "Hopeful 🌟".to_string()];
    Situation {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: 1,
        topic: "Career Decision".to_string(),
        description: "I was offered a new role in another city.".to_string(),
        desired_outcome: "Decide with confidence".to_string(),
        emotions: serde_json::to_string(&emotions).unwrap(),
        mood_rating: 4,
        created_at: Utc::now().to_rfc3339(),
        resolved_at: None,
        resolution: None,
    }
}

fn make_entry(content: &str) -> JournalEntry {
    JournalEntry {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: 1,
        content: content.to_string(),
        mood_rating: 5,
        tags: "[]".to_string(),
        created_at: Utc::now().to_rfc3339(),
    }
}

#[test]
fn test_prompt_includes_situation_details() {
    let situation = make_situation();
    let prompt = build_situation_prompt(&situation, &[]);

    assert!(prompt.contains("Topic: Career Decision"));
    assert!(prompt.contains("Situation: I was offered a new role in another city."));
    assert!(prompt.contains("Desired Outcome: Decide with confidence"));
    assert!(prompt.contains("Current Emotions: Anxious 😰, Hopeful 🌟"));
    assert!(prompt.contains("Mood Rating: 4/10"));
    assert!(prompt.contains("(no recent entries)"));
}

#[test]
fn test_prompt_includes_journal_context() {
    let situation = make_situation();
    let entries = vec![make_entry("Felt more settled after a long walk.")];

    let prompt = build_situation_prompt(&situation, &entries);
    assert!(prompt.contains("Recent Journal Entry"));
    assert!(prompt.contains("Felt more settled after a long walk."));
    assert!(!prompt.contains("(no recent entries)"));
}

#[test]
fn test_prompt_caps_journal_context_at_three_entries() {
    let situation = make_situation();
    let entries: Vec<JournalEntry> = (0..5)
        .map(|i| make_entry(&format!("unique-entry-{}", i)))
        .collect();

    let prompt = build_situation_prompt(&situation, &entries);
    assert!(prompt.contains("unique-entry-0"));
    assert!(prompt.contains("unique-entry-2"));
    assert!(!prompt.contains("unique-entry-3"));
    assert!(!prompt.contains("unique-entry-4"));
}

#[test]
fn test_prompt_truncates_long_entries() {
    let situation = make_situation();
    let long_content = "y".repeat(300);
    let entries = vec![make_entry(&long_content)];

    let prompt = build_situation_prompt(&situation, &entries);
    let truncated = format!("{}...", "y".repeat(200));
    assert!(prompt.contains(&truncated));
    assert!(!prompt.contains(&"y".repeat(201)));
}

#[test]
fn test_prompt_asks_for_structured_guidance() {
    let prompt = build_situation_prompt(&make_situation(), &[]);
    assert!(prompt.contains("Empathetic acknowledgment"));
    assert!(prompt.contains("actionable steps"));
    assert!(prompt.contains("Reflection questions"));
}

#[test]
fn test_mask_token_short_keys() {
    assert_eq!(mask_token(""), "***");
    assert_eq!(mask_token("abc"), "***");
    assert_eq!(mask_token("sk-test-key"), "***");
}

#[test]
fn test_mask_token_long_keys() {
    let masked = mask_token("sk-proj-abcdefghijklmnop");
    assert_eq!(masked, "sk-proj***mnop");
    assert!(!masked.contains("abcdefghijkl"));
}

#[test]
fn test_fallback_advice_is_user_facing() {
    assert!(!FALLBACK_ADVICE.is_empty());
    assert!(FALLBACK_ADVICE.contains("try again"));
}
