//! # Personal Growth Assistant Bot Main Entry Point
//!
//! This is the main entry point for the Personal Growth Assistant bot.
//! It initializes logging, loads configuration, sets up the database,
//! starts the reflection reminder service, and runs the Telegram bot.

use anyhow::Result;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;

mod bot;
mod config;
mod database;
mod services;
mod utils;

use crate::bot::dialogue::ConversationState;
use crate::bot::handlers::{BotContext, BotHandler};
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::services::advice::AdviceGenerator;
use crate::services::health::HealthService;
use crate::services::reflection::ReflectionService;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration, then logging (LOG_LEVEL/LOG_FILE come from the env file)
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    utils::logging::init_tracing(config.log_file.as_deref())?;

    info!(
        "Starting Personal Growth Assistant bot v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}, Model: {}",
        config.database_url, config.http_port, config.openai_model
    );

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    info!("Running database migrations...");
    db_manager.run_migrations().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");

    // Initialize bot
    info!("Initializing Telegram bot...");
    let telegram_bot = Bot::new(&config.telegram_bot_token);
    let advisor = AdviceGenerator::new(config.openai_api_key.clone(), config.openai_model.clone());
    let ctx = BotContext {
        db: db_arc.as_ref().clone(),
        config: config.clone(),
        advisor,
    };
    let handler = BotHandler::new(ctx);
    info!("Telegram bot initialized successfully");

    // Initialize and start reflection reminder service
    info!("Initializing reflection service...");
    let mut reflection_service = match ReflectionService::new(
        telegram_bot.clone(),
        db_arc.clone(),
        &config.daily_reflection_time,
    )
    .await
    {
        Ok(service) => {
            info!("Reflection service initialized successfully");
            service
        }
        Err(e) => {
            tracing::error!("Failed to create reflection service: {}", e);
            return Err(anyhow::anyhow!("Failed to create reflection service: {}", e));
        }
    };

    if let Err(e) = reflection_service.start().await {
        tracing::error!("Failed to start reflection service: {}", e);
    } else {
        info!("Reflection service started successfully");
    }

    // Initialize health service
    let health_service = HealthService::new(db_arc.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        let storage: Arc<InMemStorage<ConversationState>> = InMemStorage::new();
        Dispatcher::builder(telegram_bot, handler.schema())
            .dependencies(dptree::deps![storage])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    // Stop reflection service on shutdown
    if let Err(e) = reflection_service.stop().await {
        tracing::warn!("Error stopping reflection service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
