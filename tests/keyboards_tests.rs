use chrono::Utc;
use growth_assistant_bot::bot::keyboards::{
    advice_rating_keyboard, confirmation_keyboard, emotion_by_slug, emotions_keyboard,
    journal_tags_keyboard, main_menu_keyboard, mood_label, mood_rating_keyboard, option_slug,
    situation_picker_keyboard, tag_by_slug, MenuAction, EMOTION_OPTIONS, JOURNAL_TAGS,
};
use growth_assistant_bot::database::models::Situation;
use teloxide::types::InlineKeyboardButtonKind;

fn callback_data(button: &teloxide::types::InlineKeyboardButton) -> &str {
    match &button.kind {
        InlineKeyboardButtonKind::CallbackData(data) => data,
        other => panic!("expected callback button, got {:?}", other),
    }
}

#[test]
fn test_menu_action_label_roundtrip() {
    let actions = [
        MenuAction::ShareSituation,
        MenuAction::WriteJournal,
        MenuAction::ViewProgress,
        MenuAction::GetAdvice,
        MenuAction::PastSituations,
        MenuAction::DailyReflection,
    ];

    for action in actions {
        assert_eq!(MenuAction::from_label(action.label()), Some(action));
    }
}

#[test]
fn test_menu_action_from_label_trims_and_rejects_unknown() {
    assert_eq!(
        MenuAction::from_label("  Write in Journal 📝  "),
        Some(MenuAction::WriteJournal)
    );
    assert_eq!(MenuAction::from_label("Something else"), None);
    assert_eq!(MenuAction::from_label(""), None);
}

#[test]
fn test_mood_labels() {
    assert_eq!(mood_label(1), "Very Low 😢");
    assert_eq!(mood_label(7), "Good 😊");
    assert_eq!(mood_label(10), "Amazing 🌟");
    assert_eq!(mood_label(0), "Unknown");
    assert_eq!(mood_label(11), "Unknown");
}

#[test]
fn test_option_slugs() {
    assert_eq!(option_slug("Anxious 😰"), "anxious");
    assert_eq!(option_slug("Self-Care 💝"), "self-care");
    assert_eq!(option_slug("Personal Growth 🌱"), "personal");
}

#[test]
fn test_emotion_and_tag_lookup_by_slug() {
    for emotion in EMOTION_OPTIONS {
        assert_eq!(emotion_by_slug(&option_slug(emotion)), Some(emotion));
    }
    for tag in JOURNAL_TAGS {
        assert_eq!(tag_by_slug(&option_slug(tag)), Some(tag));
    }

    assert_eq!(emotion_by_slug("nonexistent"), None);
    assert_eq!(tag_by_slug("nonexistent"), None);
}

#[test]
fn test_main_menu_layout() {
    let keyboard = main_menu_keyboard();
    assert_eq!(keyboard.keyboard.len(), 3);
    for row in &keyboard.keyboard {
        assert_eq!(row.len(), 2);
    }
    assert_eq!(keyboard.resize_keyboard, Some(true));
}

#[test]
fn test_emotions_keyboard_layout() {
    let keyboard = emotions_keyboard();
    // 10 emotions two per row, plus the Done row
    assert_eq!(keyboard.inline_keyboard.len(), 6);
    assert_eq!(
        callback_data(&keyboard.inline_keyboard[0][0]),
        "emotion:anxious"
    );
    let done_row = keyboard.inline_keyboard.last().unwrap();
    assert_eq!(callback_data(&done_row[0]), "emotions:done");
}

#[test]
fn test_mood_rating_keyboard_layout() {
    let keyboard = mood_rating_keyboard();
    assert_eq!(keyboard.inline_keyboard.len(), 5);

    let all_data: Vec<&str> = keyboard
        .inline_keyboard
        .iter()
        .flatten()
        .map(callback_data)
        .collect();
    assert_eq!(all_data.len(), 10);
    assert_eq!(all_data[0], "mood:1");
    assert_eq!(all_data[9], "mood:10");
}

#[test]
fn test_confirmation_and_rating_keyboards() {
    let confirm = confirmation_keyboard();
    assert_eq!(confirm.inline_keyboard.len(), 1);
    assert_eq!(callback_data(&confirm.inline_keyboard[0][0]), "confirm:yes");
    assert_eq!(callback_data(&confirm.inline_keyboard[0][1]), "confirm:no");

    let rating = advice_rating_keyboard();
    assert_eq!(callback_data(&rating.inline_keyboard[0][0]), "rate:helpful");
    assert_eq!(
        callback_data(&rating.inline_keyboard[0][1]),
        "rate:unhelpful"
    );
}

#[test]
fn test_journal_tags_keyboard_layout() {
    let keyboard = journal_tags_keyboard();
    // 9 tags three per row, plus the Done row
    assert_eq!(keyboard.inline_keyboard.len(), 4);
    let done_row = keyboard.inline_keyboard.last().unwrap();
    assert_eq!(callback_data(&done_row[0]), "tags:done");
}

#[test]
fn test_situation_picker_callback_data() {
    let situations = vec![
        make_situation("First topic"),
        make_situation("Second topic"),
    ];

    let keyboard = situation_picker_keyboard(&situations, "advise");
    assert_eq!(keyboard.inline_keyboard.len(), 2);
    assert_eq!(
        callback_data(&keyboard.inline_keyboard[0][0]),
        &format!("advise:{}", situations[0].id)
    );
    assert_eq!(keyboard.inline_keyboard[1][0].text, "Second topic");

    let resolver = situation_picker_keyboard(&situations, "resolve");
    assert!(callback_data(&resolver.inline_keyboard[0][0]).starts_with("resolve:"));
}

fn make_situation(topic: &str) -> Situation {
    Situation {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: 1,
        topic: topic.to_string(),
        description: "description".to_string(),
        desired_outcome: "outcome".to_string(),
        emotions: "[]".to_string(),
        mood_rating: 5,
        created_at: Utc::now().to_rfc3339(),
        resolved_at: None,
        resolution: None,
    }
}
