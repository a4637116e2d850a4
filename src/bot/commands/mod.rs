use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "Personal Growth Assistant commands:"
)]
pub enum Command {
    #[command(description = "Start the bot and open the main menu")]
    Start,
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Cancel the current operation")]
    Cancel,
}
