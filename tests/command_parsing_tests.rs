use growth_assistant_bot::bot::commands::Command;
use teloxide::utils::command::BotCommands;

#[test]
fn test_start_command_parsing() {
    let result = Command::parse("/start", "growthbot");
    assert!(result.is_ok());
    assert!(matches!(result.unwrap(), Command::Start));
}

#[test]
fn test_help_command_parsing() {
    let result = Command::parse("/help", "growthbot");
    assert!(result.is_ok());
    assert!(matches!(result.unwrap(), Command::Help));
}

#[test]
fn test_cancel_command_parsing() {
    let result = Command::parse("/cancel", "growthbot");
    assert!(result.is_ok());
    assert!(matches!(result.unwrap(), Command::Cancel));
}

#[test]
fn test_command_with_bot_mention() {
    let result = Command::parse("/start@growthbot", "growthbot");
    assert!(result.is_ok());
    assert!(matches!(result.unwrap(), Command::Start));
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Command::parse("/unknown", "growthbot").is_err());
    assert!(Command::parse("not a command", "growthbot").is_err());
}

#[test]
fn test_descriptions_cover_all_commands() {
    let descriptions = Command::descriptions().to_string();
    assert!(descriptions.contains("/start"));
    assert!(descriptions.contains("/help"));
    assert!(descriptions.contains("/cancel"));
}
