/// Bot commands (`/start`, `/help`, `/cancel`)
pub mod commands;
/// Conversation states and in-flight drafts
pub mod dialogue;
/// Update dispatch schema and handlers
pub mod handlers;
/// Reply and inline keyboards, fixed option sets
pub mod keyboards;
