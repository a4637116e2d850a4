/// Datetime parsing and display helpers
pub mod datetime;
/// Emoji-prefixed user feedback messages
pub mod feedback;
/// Message splitting and report formatting
pub mod formatting;
/// Tracing initialization and structured log helpers
pub mod logging;
/// Telegram MarkdownV2 escaping
pub mod markdown;
/// Input validation for user-supplied text and configuration
pub mod validation;
