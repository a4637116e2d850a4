//! # Personal Growth Assistant Bot
//!
//! A Telegram bot for logging personal situations, journaling, and mood
//! tracking, with AI-generated advice and daily reflection reminders.
//!
//! ## Features
//! - Guided situation logging (topic, description, desired outcome, emotions, mood)
//! - Personal journal with mood ratings and tags
//! - Progress reports built from mood trends and recurring themes
//! - AI advice via the OpenAI chat completions API
//! - Daily reflection reminder at a configured time
//! - Persistent storage with SQLite

/// Bot command handlers, dialogue states, and keyboards
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Background services: advice generation, insights, reflection reminders
pub mod services;
/// Utility functions for formatting, validation, and logging
pub mod utils;
