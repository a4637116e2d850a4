pub mod callback;
pub mod message;

use crate::bot::dialogue::ConversationState;
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::services::advice::AdviceGenerator;
use teloxide::{
    dispatching::{
        dialogue::{self, InMemStorage},
        UpdateHandler,
    },
    prelude::*,
};

/// Handler result type shared by all dialogue endpoints. Boxing lets `?`
/// cover both Telegram request errors and dialogue storage errors.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// The dialogue handle injected into endpoints by `dialogue::enter`.
pub type BotDialogue = Dialogue<ConversationState, InMemStorage<ConversationState>>;

/// Shared per-request context: database pool, configuration, and the advice
/// generator. Cheap to clone (pool and OpenAI client are internally shared).
#[derive(Clone)]
pub struct BotContext {
    pub db: DatabaseManager,
    pub config: Config,
    pub advisor: AdviceGenerator,
}

pub struct BotHandler {
    pub ctx: BotContext,
}

impl BotHandler {
    pub fn new(ctx: BotContext) -> Self {
        Self { ctx }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let ctx_commands = self.ctx.clone();
        let ctx_messages = self.ctx.clone();
        let ctx_callbacks = self.ctx.clone();

        dialogue::enter::<Update, InMemStorage<ConversationState>, ConversationState, _>()
            .branch(
                Update::filter_message()
                    .filter_command::<crate::bot::commands::Command>()
                    .endpoint(move |bot, dialogue, msg, cmd| {
                        let ctx = ctx_commands.clone();
                        async move { message::command_handler(bot, dialogue, msg, cmd, ctx).await }
                    }),
            )
            .branch(Update::filter_message().endpoint(move |bot, dialogue, msg| {
                let ctx = ctx_messages.clone();
                async move { message::text_handler(bot, dialogue, msg, ctx).await }
            }))
            .branch(Update::filter_callback_query().endpoint(move |bot, dialogue, q| {
                let ctx = ctx_callbacks.clone();
                async move { callback::callback_handler(bot, dialogue, q, ctx).await }
            }))
    }
}
