use teloxide::prelude::*;

use crate::bot::dialogue::ConversationState;
use crate::bot::handlers::{BotContext, BotDialogue, HandlerResult};
use crate::bot::keyboards::{
    advice_rating_keyboard, confirmation_keyboard, emotion_by_slug, emotions_keyboard,
    journal_tags_keyboard, main_menu_keyboard, mood_label, mood_rating_keyboard, tag_by_slug,
};
use crate::database::models::{Advice, JournalEntry, Situation};
use crate::services::advice::FALLBACK_ADVICE;
use crate::utils::datetime::window_cutoff;
use crate::utils::feedback::{Feedback, FeedbackType};
use crate::utils::formatting::split_message;
use crate::utils::logging::log_handler_error;
use crate::utils::validation::validate_mood_rating;

pub async fn callback_handler(
    bot: Bot,
    dialogue: BotDialogue,
    q: CallbackQuery,
    ctx: BotContext,
) -> HandlerResult {
    let user_id = q.from.id.0 as i64;
    let username = q.from.username.as_deref().unwrap_or("unknown");

    let data = match q.data.clone() {
        Some(data) => data,
        None => {
            bot.answer_callback_query(q.id.clone()).await?;
            return Ok(());
        }
    };
    let message = match q.message.clone() {
        Some(message) => message,
        None => {
            bot.answer_callback_query(q.id.clone()).await?;
            return Ok(());
        }
    };
    let chat_id = message.chat.id;

    tracing::info!(
        "Callback received: '{}' from user {} ({}) in chat {}",
        data,
        username,
        user_id,
        chat_id.0
    );

    // Dismiss the button spinner right away.
    bot.answer_callback_query(q.id.clone()).await?;

    // Situation pickers work from any state.
    if let Some(situation_id) = data.strip_prefix("advise:") {
        return handle_advice_request(&bot, &dialogue, chat_id, user_id, situation_id, &ctx).await;
    }
    if let Some(situation_id) = data.strip_prefix("resolve:") {
        return handle_resolve_request(&bot, &dialogue, chat_id, user_id, situation_id, &ctx)
            .await;
    }

    let state = dialogue.get().await?.unwrap_or_default();

    match state {
        ConversationState::SelectingEmotions { mut draft } => {
            if data == "emotions:done" {
                if draft.emotions.is_empty() {
                    bot.edit_message_text(chat_id, message.id, "Please select at least one emotion.")
                        .reply_markup(emotions_keyboard())
                        .await?;
                    return Ok(());
                }
                bot.edit_message_text(
                    chat_id,
                    message.id,
                    "How would you rate your current mood (1-10)?",
                )
                .reply_markup(mood_rating_keyboard())
                .await?;
                dialogue
                    .update(ConversationState::RatingSituationMood { draft })
                    .await?;
                return Ok(());
            }

            let Some(slug) = data.strip_prefix("emotion:") else {
                return Ok(());
            };
            let Some(emotion) = emotion_by_slug(slug) else {
                return Ok(());
            };
            if !draft.emotions.iter().any(|e| e == emotion) {
                draft.emotions.push(emotion.to_string());
            }

            bot.edit_message_text(
                chat_id,
                message.id,
                format!(
                    "Selected emotions: {}\nSelect more or press Done when finished.",
                    draft.emotions.join(", ")
                ),
            )
            .reply_markup(emotions_keyboard())
            .await?;
            dialogue
                .update(ConversationState::SelectingEmotions { draft })
                .await?;
        }

        ConversationState::RatingSituationMood { mut draft } => {
            let Some(rating) = parse_mood(&data) else {
                return Ok(());
            };
            draft.mood_rating = Some(rating);

            let summary = format!(
                "Topic: {}\n\nSituation: {}\n\nDesired Outcome: {}\n\n\
                 Emotions: {}\nCurrent Mood: {}/10 - {}\n\n\
                 Would you like to save this situation and get advice?",
                draft.topic,
                draft.description,
                draft.desired_outcome,
                draft.emotions.join(", "),
                rating,
                mood_label(rating),
            );
            bot.edit_message_text(chat_id, message.id, summary)
                .reply_markup(confirmation_keyboard())
                .await?;
            dialogue
                .update(ConversationState::ConfirmingSituation { draft })
                .await?;
        }

        ConversationState::ConfirmingSituation { draft } => match data.as_str() {
            "confirm:yes" => {
                let mood_rating = draft.mood_rating.unwrap_or(5);
                let situation = Situation::create(
                    &ctx.db.pool,
                    user_id,
                    draft.topic,
                    draft.description,
                    draft.desired_outcome,
                    &draft.emotions,
                    mood_rating,
                )
                .await?;
                Situation::prune_history(&ctx.db.pool, user_id, ctx.config.max_situations_history)
                    .await?;

                bot.edit_message_text(chat_id, message.id, "✅ Situation saved.")
                    .await?;
                generate_and_deliver_advice(&bot, &dialogue, chat_id, &ctx, &situation).await?;
            }
            "confirm:no" => {
                bot.edit_message_text(
                    chat_id,
                    message.id,
                    "No problem. What would you like to do instead?",
                )
                .await?;
                bot.send_message(chat_id, "Pick an option from the menu below.")
                    .reply_markup(main_menu_keyboard())
                    .await?;
                dialogue.update(ConversationState::SelectingAction).await?;
            }
            _ => {}
        },

        ConversationState::RatingAdvice { advice_id } => {
            let was_helpful = match data.as_str() {
                "rate:helpful" => true,
                "rate:unhelpful" => false,
                _ => return Ok(()),
            };
            Advice::set_helpful(&ctx.db.pool, &advice_id, was_helpful).await?;

            bot.edit_message_text(chat_id, message.id, "Thank you for your feedback! 🙏")
                .await?;
            bot.send_message(chat_id, "What would you like to do next?")
                .reply_markup(main_menu_keyboard())
                .await?;
            dialogue.update(ConversationState::SelectingAction).await?;
        }

        ConversationState::RatingJournalMood { content } => {
            let Some(rating) = parse_mood(&data) else {
                return Ok(());
            };
            bot.edit_message_text(
                chat_id,
                message.id,
                "Would you like to add any tags to your journal entry?",
            )
            .reply_markup(journal_tags_keyboard())
            .await?;
            dialogue
                .update(ConversationState::TaggingEntry {
                    content,
                    mood_rating: rating,
                    tags: Vec::new(),
                })
                .await?;
        }

        ConversationState::TaggingEntry {
            content,
            mood_rating,
            mut tags,
        } => {
            if data == "tags:done" {
                JournalEntry::create(&ctx.db.pool, user_id, content, mood_rating, &tags).await?;
                JournalEntry::prune_history(&ctx.db.pool, user_id, ctx.config.max_journal_entries)
                    .await?;

                bot.edit_message_text(chat_id, message.id, "Journal entry saved! 📝")
                    .await?;
                bot.send_message(chat_id, "What would you like to do next?")
                    .reply_markup(main_menu_keyboard())
                    .await?;
                dialogue.update(ConversationState::SelectingAction).await?;
                return Ok(());
            }

            let Some(slug) = data.strip_prefix("tag:") else {
                return Ok(());
            };
            let Some(tag) = tag_by_slug(slug) else {
                return Ok(());
            };
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }

            bot.edit_message_text(
                chat_id,
                message.id,
                format!(
                    "Selected tags: {}\nSelect more or press Done when finished.",
                    tags.join(", ")
                ),
            )
            .reply_markup(journal_tags_keyboard())
            .await?;
            dialogue
                .update(ConversationState::TaggingEntry {
                    content,
                    mood_rating,
                    tags,
                })
                .await?;
        }

        _ => {
            bot.send_message(
                chat_id,
                "That button is no longer active. Pick an option from the menu below.",
            )
            .reply_markup(main_menu_keyboard())
            .await?;
        }
    }

    Ok(())
}

fn parse_mood(data: &str) -> Option<i64> {
    let rating: i64 = data.strip_prefix("mood:")?.parse().ok()?;
    validate_mood_rating(rating).ok()?;
    Some(rating)
}

async fn handle_advice_request(
    bot: &Bot,
    dialogue: &BotDialogue,
    chat_id: ChatId,
    user_id: i64,
    situation_id: &str,
    ctx: &BotContext,
) -> HandlerResult {
    let situation = match Situation::find_by_id(&ctx.db.pool, situation_id).await? {
        Some(s) if s.user_id == user_id => s,
        _ => {
            bot.send_message(chat_id, "I couldn't find that situation anymore.")
                .reply_markup(main_menu_keyboard())
                .await?;
            return Ok(());
        }
    };

    generate_and_deliver_advice(bot, dialogue, chat_id, ctx, &situation).await
}

async fn handle_resolve_request(
    bot: &Bot,
    dialogue: &BotDialogue,
    chat_id: ChatId,
    user_id: i64,
    situation_id: &str,
    ctx: &BotContext,
) -> HandlerResult {
    let situation = match Situation::find_by_id(&ctx.db.pool, situation_id).await? {
        Some(s) if s.user_id == user_id => s,
        _ => {
            bot.send_message(chat_id, "I couldn't find that situation anymore.")
                .reply_markup(main_menu_keyboard())
                .await?;
            return Ok(());
        }
    };

    bot.send_message(
        chat_id,
        format!(
            "How did '{}' work out? Describe the resolution below.",
            situation.topic
        ),
    )
    .await?;
    dialogue
        .update(ConversationState::ReceivingResolution {
            situation_id: situation.id,
        })
        .await?;

    Ok(())
}

/// Generates advice for a saved situation and delivers it, chunked to the
/// configured message length. Advice failures fall back to an apology and
/// return the user to the menu; the situation itself is already persisted.
async fn generate_and_deliver_advice(
    bot: &Bot,
    dialogue: &BotDialogue,
    chat_id: ChatId,
    ctx: &BotContext,
    situation: &Situation,
) -> HandlerResult {
    let feedback = Feedback::new(bot.clone(), chat_id);
    let processing = feedback
        .send_processing("Thinking through your situation...")
        .await?;

    let cutoff = window_cutoff(ctx.config.analysis_window_days);
    let entries = JournalEntry::find_since(&ctx.db.pool, situation.user_id, &cutoff)
        .await
        .unwrap_or_default();

    match ctx.advisor.generate(situation, &entries).await {
        Ok(text) => {
            let advice = Advice::create(&ctx.db.pool, situation.id.clone(), text.clone()).await?;

            let full = format!("Here's my advice:\n\n{}", text);
            let chunks = split_message(&full, ctx.config.max_message_length);
            let mut chunks = chunks.into_iter();

            if let Some(first) = chunks.next() {
                bot.edit_message_text(chat_id, processing.id, first).await?;
            }
            for chunk in chunks {
                bot.send_message(chat_id, chunk).await?;
            }

            bot.send_message(chat_id, "Was this advice helpful?")
                .reply_markup(advice_rating_keyboard())
                .await?;
            dialogue
                .update(ConversationState::RatingAdvice {
                    advice_id: advice.id,
                })
                .await?;
        }
        Err(e) => {
            log_handler_error("generate_advice", situation.user_id, chat_id.0, &e.to_string());
            feedback
                .update_message(processing.id, FeedbackType::Error, FALLBACK_ADVICE)
                .await?;
            bot.send_message(chat_id, "What would you like to do next?")
                .reply_markup(main_menu_keyboard())
                .await?;
            dialogue.update(ConversationState::SelectingAction).await?;
        }
    }

    Ok(())
}
