use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from `LOG_LEVEL`
/// (scoped to this crate), defaulting to `info`. When `log_file` is set an
/// additional plain-text layer appends to that file.
pub fn init_tracing(log_file: Option<&str>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        format!("growth_assistant_bot={level},tower_http=debug").into()
    });

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    Ok(())
}

/// Logs a user-initiated action with consistent format
pub fn log_user_action(action: &str, user: &str, user_id: i64, chat_id: i64) {
    info!(
        "ACTION: {} by {}({}) in chat {}",
        action, user, user_id, chat_id
    );
}

/// Logs handler errors with consistent format
pub fn log_handler_error(action: &str, user_id: i64, chat_id: i64, err: &str) {
    error!(
        "HANDLER_ERROR: {} for user {} in chat {} - {}",
        action, user_id, chat_id, err
    );
}
