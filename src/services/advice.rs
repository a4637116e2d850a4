use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use std::sync::Arc;

use crate::database::models::{JournalEntry, Situation};
use crate::utils::datetime::format_date_label;

/// Shown to the user when advice generation fails. The situation itself is
/// already saved by then.
pub const FALLBACK_ADVICE: &str =
    "I'm having trouble analyzing this situation right now. Please try again later.";

const SYSTEM_PROMPT: &str = "You are a compassionate AI life coach specializing in personal \
growth and problem-solving. Provide empathetic, constructive, and actionable advice for \
individuals facing life challenges. Focus on self-improvement, emotional intelligence, and \
practical solutions.";

/// Masks an API key for safe logging: first 7 chars + "***" + last 4 chars,
/// or "***" when the key is too short to mask meaningfully.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// Generates advice for personal situations through the OpenAI chat API.
#[derive(Clone)]
pub struct AdviceGenerator {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    api_key_for_logging: String,
}

impl AdviceGenerator {
    pub fn new(api_key: String, model: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            model,
            api_key_for_logging,
        }
    }

    /// Requests advice for `situation`, using the user's recent journal
    /// entries as extra context. Returns the first completion choice.
    pub async fn generate(
        &self,
        situation: &Situation,
        recent_entries: &[JournalEntry],
    ) -> Result<String> {
        let prompt = build_situation_prompt(situation, recent_entries);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_PROMPT)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        ];

        tracing::info!(
            model = %self.model,
            api_key = %mask_token(&self.api_key_for_logging),
            situation_id = %situation.id,
            journal_context = recent_entries.len().min(3),
            "Requesting advice completion"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(0.7)
            .messages(messages)
            .build()?;

        let response = self.client.chat().create(request).await?;

        if let Some(usage) = &response.usage {
            tracing::info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Advice completion usage"
            );
        }

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| anyhow::anyhow!("Completion returned no content"))
    }
}

/// Builds the user prompt: the situation details plus up to three recent
/// journal entries, each truncated to 200 characters.
pub fn build_situation_prompt(situation: &Situation, recent_entries: &[JournalEntry]) -> String {
    let journal_context = recent_entries
        .iter()
        .take(3)
        .map(|entry| {
            format!(
                "Recent Journal Entry ({}): {}",
                format_date_label(&entry.created_at),
                truncate_chars(&entry.content, 200)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Please analyze this personal situation and provide guidance:\n\n\
         Topic: {}\n\
         Situation: {}\n\
         Desired Outcome: {}\n\
         Current Emotions: {}\n\
         Mood Rating: {}/10\n\n\
         Recent Journal Context:\n{}\n\n\
         Please provide:\n\
         1. Empathetic acknowledgment of the situation and emotions\n\
         2. Personal insights and potential root causes to consider\n\
         3. Specific, actionable steps for personal growth\n\
         4. Coping strategies and self-care suggestions\n\
         5. Reflection questions for deeper understanding\n\
         6. A positive affirmation or motivation for moving forward",
        situation.topic,
        situation.description,
        situation.desired_outcome,
        situation.emotion_list().join(", "),
        situation.mood_rating,
        if journal_context.is_empty() {
            "(no recent entries)"
        } else {
            &journal_context
        },
    )
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated)
}
