use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::Command;
use crate::bot::dialogue::{ConversationState, SituationDraft};
use crate::bot::handlers::{BotContext, BotDialogue, HandlerResult};
use crate::bot::keyboards::{
    emotions_keyboard, main_menu_keyboard, mood_rating_keyboard, situation_picker_keyboard,
    MenuAction,
};
use crate::database::models::{Situation, User};
use crate::services::insights::ProgressReport;
use crate::services::reflection::prompt_of_the_day;
use crate::utils::datetime::format_date_label;
use crate::utils::feedback::Feedback;
use crate::utils::formatting::format_time_ago;
use crate::utils::logging::log_user_action;
use crate::utils::validation::{validate_free_text, validate_topic};

pub async fn command_handler(
    bot: Bot,
    dialogue: BotDialogue,
    msg: Message,
    cmd: Command,
    ctx: BotContext,
) -> HandlerResult {
    let user_id = match msg.from() {
        Some(user) => user.id.0 as i64,
        None => return Ok(()),
    };
    let username = msg
        .from()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");

    match cmd {
        Command::Start => {
            log_user_action("/start", username, user_id, msg.chat.id.0);

            let (_, is_new) =
                User::create_or_touch(&ctx.db.pool, user_id, msg.chat.id.0).await?;

            let welcome_text = if is_new {
                "Welcome to your Personal Growth Assistant! 🌟\n\n\
                 I'm here to help you navigate life's challenges, track your personal growth, \
                 and provide thoughtful advice for your situations.\n\n\
                 You can:\n\
                 • Share situations you'd like guidance on 💭\n\
                 • Keep a personal journal 📝\n\
                 • Track your progress over time 📊\n\
                 • Get AI-powered advice 🤖\n\
                 • Reflect on past experiences 📚\n\n\
                 What would you like to do?"
                    .to_string()
            } else {
                "Welcome back! What would you like to do?".to_string()
            };

            bot.send_message(msg.chat.id, welcome_text)
                .reply_markup(main_menu_keyboard())
                .await?;
            dialogue.update(ConversationState::SelectingAction).await?;
        }
        Command::Help => {
            let help_text = format!(
                "Here's how to use your Personal Growth Assistant:\n\n\
                 1. 💭 Share a Situation - Describe a situation you'd like guidance on\n\
                 2. 📝 Write in Journal - Record your thoughts and feelings\n\
                 3. 📊 View Progress - See your growth and patterns over time\n\
                 4. 🤖 Get AI Advice - Receive personalized guidance\n\
                 5. 📚 Past Situations - Review previous situations and outcomes\n\
                 6. ✨ Daily Reflection - Take time for self-reflection\n\n\
                 {}",
                Command::descriptions()
            );
            bot.send_message(msg.chat.id, help_text).await?;
        }
        Command::Cancel => {
            log_user_action("/cancel", username, user_id, msg.chat.id.0);
            dialogue.update(ConversationState::SelectingAction).await?;
            bot.send_message(
                msg.chat.id,
                "Operation cancelled. What would you like to do?",
            )
            .reply_markup(main_menu_keyboard())
            .await?;
        }
    }
    Ok(())
}

/// Routes free-text messages according to the current dialogue state.
pub async fn text_handler(
    bot: Bot,
    dialogue: BotDialogue,
    msg: Message,
    ctx: BotContext,
) -> HandlerResult {
    let user_id = match msg.from() {
        Some(user) => user.id.0 as i64,
        None => return Ok(()),
    };
    let text = match msg.text() {
        Some(text) => text.to_string(),
        None => return Ok(()),
    };

    let state = dialogue.get().await?.unwrap_or_default();
    let feedback = Feedback::new(bot.clone(), msg.chat.id);

    match state {
        ConversationState::SelectingAction => {
            handle_menu_selection(&bot, &dialogue, &msg, &text, user_id, &ctx).await?;
        }
        ConversationState::ReceivingTopic => {
            if let Err(e) = validate_topic(&text) {
                feedback
                    .validation_error(
                        &e.to_string(),
                        "Try a short theme like 'Career Decision' or 'Personal Growth'.",
                    )
                    .await?;
                return Ok(());
            }
            bot.send_message(
                msg.chat.id,
                "Please describe your situation in detail. What's happening? \
                 What are your thoughts and concerns about it?",
            )
            .await?;
            dialogue
                .update(ConversationState::ReceivingDescription {
                    topic: text.trim().to_string(),
                })
                .await?;
        }
        ConversationState::ReceivingDescription { topic } => {
            if let Err(e) = validate_free_text(&text) {
                feedback
                    .validation_error(&e.to_string(), "Describe what's happening in a few sentences.")
                    .await?;
                return Ok(());
            }
            bot.send_message(
                msg.chat.id,
                "What outcome would you like to achieve in this situation? \
                 What's your ideal resolution or goal?",
            )
            .await?;
            dialogue
                .update(ConversationState::ReceivingOutcome {
                    topic,
                    description: text.trim().to_string(),
                })
                .await?;
        }
        ConversationState::ReceivingOutcome { topic, description } => {
            if let Err(e) = validate_free_text(&text) {
                feedback
                    .validation_error(&e.to_string(), "Describe your ideal outcome in a sentence or two.")
                    .await?;
                return Ok(());
            }
            let draft = SituationDraft {
                topic,
                description,
                desired_outcome: text.trim().to_string(),
                emotions: Vec::new(),
                mood_rating: None,
            };
            bot.send_message(
                msg.chat.id,
                "What emotions are you experiencing with this situation?",
            )
            .reply_markup(emotions_keyboard())
            .await?;
            dialogue
                .update(ConversationState::SelectingEmotions { draft })
                .await?;
        }
        ConversationState::WritingJournal => {
            if let Err(e) = validate_free_text(&text) {
                feedback
                    .validation_error(&e.to_string(), "Write a few words about your day.")
                    .await?;
                return Ok(());
            }
            bot.send_message(msg.chat.id, "How would you rate your mood right now?")
                .reply_markup(mood_rating_keyboard())
                .await?;
            dialogue
                .update(ConversationState::RatingJournalMood {
                    content: text.trim().to_string(),
                })
                .await?;
        }
        ConversationState::ReceivingResolution { situation_id } => {
            if let Err(e) = validate_free_text(&text) {
                feedback
                    .validation_error(&e.to_string(), "Describe how the situation worked out.")
                    .await?;
                return Ok(());
            }
            Situation::resolve(&ctx.db.pool, &situation_id, text.trim()).await?;
            log_user_action("resolve_situation", "user", user_id, msg.chat.id.0);
            bot.send_message(
                msg.chat.id,
                "Marked as resolved — well done! 🎉 What would you like to do next?",
            )
            .reply_markup(main_menu_keyboard())
            .await?;
            dialogue.update(ConversationState::SelectingAction).await?;
        }
        // Button-driven states: nudge the user back to the inline keyboard.
        _ => {
            bot.send_message(
                msg.chat.id,
                "Please use the buttons above, or /cancel to start over.",
            )
            .await?;
        }
    }

    Ok(())
}

async fn handle_menu_selection(
    bot: &Bot,
    dialogue: &BotDialogue,
    msg: &Message,
    text: &str,
    user_id: i64,
    ctx: &BotContext,
) -> HandlerResult {
    let action = match MenuAction::from_label(text) {
        Some(action) => action,
        None => {
            bot.send_message(
                msg.chat.id,
                "I didn't recognize that option. Please pick one from the menu below.",
            )
            .reply_markup(main_menu_keyboard())
            .await?;
            return Ok(());
        }
    };

    log_user_action(action.label(), "user", user_id, msg.chat.id.0);

    match action {
        MenuAction::ShareSituation => {
            bot.send_message(
                msg.chat.id,
                "What's the main topic or theme of your situation?\n\n\
                 For example: 'Career Decision', 'Personal Growth', 'Life Change', etc.",
            )
            .await?;
            dialogue.update(ConversationState::ReceivingTopic).await?;
        }
        MenuAction::WriteJournal => {
            bot.send_message(
                msg.chat.id,
                "Write your journal entry below. You can share your thoughts, feelings, \
                 experiences, or reflections from your day.",
            )
            .await?;
            dialogue.update(ConversationState::WritingJournal).await?;
        }
        MenuAction::ViewProgress => {
            send_progress_report(bot, msg, user_id, ctx).await?;
        }
        MenuAction::GetAdvice => {
            send_advice_picker(bot, msg, user_id, ctx).await?;
        }
        MenuAction::PastSituations => {
            send_past_situations(bot, msg, user_id, ctx).await?;
        }
        MenuAction::DailyReflection => {
            let prompt = prompt_of_the_day(chrono::Utc::now().date_naive());
            bot.send_message(
                msg.chat.id,
                format!(
                    "✨ Take a moment to reflect.\n\n{}\n\nWrite your reflection below.",
                    prompt
                ),
            )
            .await?;
            dialogue.update(ConversationState::WritingJournal).await?;
        }
    }

    Ok(())
}

async fn send_progress_report(
    bot: &Bot,
    msg: &Message,
    user_id: i64,
    ctx: &BotContext,
) -> HandlerResult {
    let report = ProgressReport::for_user(&ctx.db.pool, user_id).await?;

    match report {
        Some(report) => {
            bot.send_message(msg.chat.id, report.render())
                .reply_markup(main_menu_keyboard())
                .await?;
        }
        None => {
            bot.send_message(
                msg.chat.id,
                "I don't have enough data to show your progress yet. \
                 Continue sharing situations and writing in your journal to track your growth!",
            )
            .reply_markup(main_menu_keyboard())
            .await?;
        }
    }

    Ok(())
}

async fn send_advice_picker(
    bot: &Bot,
    msg: &Message,
    user_id: i64,
    ctx: &BotContext,
) -> HandlerResult {
    let situations = Situation::find_unresolved(&ctx.db.pool, user_id, 5).await?;

    if situations.is_empty() {
        bot.send_message(
            msg.chat.id,
            "You don't have any active situations to get advice for. \
             Would you like to share a new situation?",
        )
        .reply_markup(main_menu_keyboard())
        .await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, "Which situation would you like advice for?")
        .reply_markup(situation_picker_keyboard(&situations, "advise"))
        .await?;

    Ok(())
}

async fn send_past_situations(
    bot: &Bot,
    msg: &Message,
    user_id: i64,
    ctx: &BotContext,
) -> HandlerResult {
    let situations = Situation::find_recent(&ctx.db.pool, user_id, 5).await?;

    if situations.is_empty() {
        bot.send_message(
            msg.chat.id,
            "You haven't shared any situations yet. Would you like to share one now?",
        )
        .reply_markup(main_menu_keyboard())
        .await?;
        return Ok(());
    }

    let mut response = String::from("Your Recent Situations:\n\n");
    for (i, situation) in situations.iter().enumerate() {
        let status = if situation.is_resolved() {
            "✅ Resolved"
        } else {
            "🔄 Active"
        };
        let age = chrono::DateTime::parse_from_rfc3339(&situation.created_at)
            .map(|dt| format_time_ago(chrono::Utc::now().signed_duration_since(dt)))
            .unwrap_or_else(|_| format_date_label(&situation.created_at));
        response.push_str(&format!(
            "{}. {} ({})\nCreated: {}\nEmotions: {}\n\n",
            i + 1,
            situation.topic,
            status,
            age,
            situation.emotion_list().join(", "),
        ));
    }

    bot.send_message(msg.chat.id, response).await?;

    let unresolved: Vec<_> = situations
        .into_iter()
        .filter(|s| !s.is_resolved())
        .collect();
    if !unresolved.is_empty() {
        bot.send_message(msg.chat.id, "Tap a situation to mark it as resolved:")
            .reply_markup(situation_picker_keyboard(&unresolved, "resolve"))
            .await?;
    }

    Ok(())
}
