use crate::database::models::Situation;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup as ReplyKeyboardMarkup,
};

/// Predefined emotion options shown during the situation flow.
pub const EMOTION_OPTIONS: [&str; 10] = [
    "Anxious 😰",
    "Overwhelmed 😫",
    "Frustrated 😤",
    "Sad 😢",
    "Angry 😠",
    "Disappointed 😞",
    "Confused 😕",
    "Hopeful 🌟",
    "Motivated 💪",
    "Calm 😌",
];

/// Predefined journal entry tags.
pub const JOURNAL_TAGS: [&str; 9] = [
    "Personal Growth 🌱",
    "Reflection 🤔",
    "Achievement 🏆",
    "Challenge 💪",
    "Learning 📚",
    "Gratitude 🙏",
    "Goal Setting 🎯",
    "Self-Care 💝",
    "Breakthrough 💡",
];

/// Main menu actions, matched against the reply-keyboard button labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ShareSituation,
    WriteJournal,
    ViewProgress,
    GetAdvice,
    PastSituations,
    DailyReflection,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::ShareSituation => "Share a Situation 💭",
            MenuAction::WriteJournal => "Write in Journal 📝",
            MenuAction::ViewProgress => "View Progress 📊",
            MenuAction::GetAdvice => "Get AI Advice 🤖",
            MenuAction::PastSituations => "Past Situations 📚",
            MenuAction::DailyReflection => "Daily Reflection ✨",
        }
    }

    pub fn from_label(text: &str) -> Option<Self> {
        const ALL: [MenuAction; 6] = [
            MenuAction::ShareSituation,
            MenuAction::WriteJournal,
            MenuAction::ViewProgress,
            MenuAction::GetAdvice,
            MenuAction::PastSituations,
            MenuAction::DailyReflection,
        ];
        ALL.into_iter().find(|a| a.label() == text.trim())
    }
}

/// Short mood description for a 1-10 rating.
pub fn mood_label(rating: i64) -> &'static str {
    match rating {
        1 => "Very Low 😢",
        2 => "Low 😞",
        3 => "Somewhat Low 😕",
        4 => "Below Average 😐",
        5 => "Neutral 😶",
        6 => "Slightly Good 🙂",
        7 => "Good 😊",
        8 => "Very Good 😃",
        9 => "Excellent 😄",
        10 => "Amazing 🌟",
        _ => "Unknown",
    }
}

/// Callback slug for an option label: its first word, lowercased.
/// "Anxious 😰" -> "anxious", "Self-Care 💝" -> "self-care".
pub fn option_slug(label: &str) -> String {
    label
        .split_whitespace()
        .next()
        .unwrap_or(label)
        .to_lowercase()
}

pub fn emotion_by_slug(slug: &str) -> Option<&'static str> {
    EMOTION_OPTIONS.into_iter().find(|e| option_slug(e) == slug)
}

pub fn tag_by_slug(slug: &str) -> Option<&'static str> {
    JOURNAL_TAGS.into_iter().find(|t| option_slug(t) == slug)
}

/// Main menu as a persistent reply keyboard, two actions per row.
pub fn main_menu_keyboard() -> ReplyKeyboardMarkup {
    let labels = [
        MenuAction::ShareSituation,
        MenuAction::WriteJournal,
        MenuAction::ViewProgress,
        MenuAction::GetAdvice,
        MenuAction::PastSituations,
        MenuAction::DailyReflection,
    ];

    let rows: Vec<Vec<KeyboardButton>> = labels
        .chunks(2)
        .map(|pair| pair.iter().map(|a| KeyboardButton::new(a.label())).collect())
        .collect();

    ReplyKeyboardMarkup::new(rows).resize_keyboard(true)
}

/// Emotion multi-select, two per row, with a Done button at the bottom.
pub fn emotions_keyboard() -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = EMOTION_OPTIONS
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|e| {
                    InlineKeyboardButton::callback(*e, format!("emotion:{}", option_slug(e)))
                })
                .collect()
        })
        .collect();

    rows.push(vec![InlineKeyboardButton::callback(
        "Done ✅",
        "emotions:done",
    )]);
    InlineKeyboardMarkup::new(rows)
}

/// Mood rating 1-10, two per row.
pub fn mood_rating_keyboard() -> InlineKeyboardMarkup {
    let ratings: Vec<i64> = (1..=10).collect();
    let rows: Vec<Vec<InlineKeyboardButton>> = ratings
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|r| {
                    InlineKeyboardButton::callback(
                        format!("{} - {}", r, mood_label(*r)),
                        format!("mood:{}", r),
                    )
                })
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(rows)
}

pub fn confirmation_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Yes ✅", "confirm:yes"),
        InlineKeyboardButton::callback("No ❌", "confirm:no"),
    ]])
}

pub fn advice_rating_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Helpful 👍", "rate:helpful"),
        InlineKeyboardButton::callback("Not Helpful 👎", "rate:unhelpful"),
    ]])
}

/// Journal tag multi-select, three per row, with a Done button.
pub fn journal_tags_keyboard() -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = JOURNAL_TAGS
        .chunks(3)
        .map(|chunk| {
            chunk
                .iter()
                .map(|t| InlineKeyboardButton::callback(*t, format!("tag:{}", option_slug(t))))
                .collect()
        })
        .collect();

    rows.push(vec![InlineKeyboardButton::callback("Done ✅", "tags:done")]);
    InlineKeyboardMarkup::new(rows)
}

/// One button per situation, used for the advice picker (`advise:<id>`)
/// and the resolve picker (`resolve:<id>`).
pub fn situation_picker_keyboard(situations: &[Situation], action: &str) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = situations
        .iter()
        .map(|s| {
            vec![InlineKeyboardButton::callback(
                s.topic.clone(),
                format!("{}:{}", action, s.id),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(rows)
}
