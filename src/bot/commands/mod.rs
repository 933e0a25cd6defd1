pub mod guide;
pub mod reminders;

use teloxide::types::BotCommand;
use teloxide::utils::command::{BotCommands, ParseError};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Refugee help bot commands:")]
pub enum Command {
    #[command(description = "start posting the pinned message as a reminder (admins only)")]
    Start,
    #[command(description = "stop posting reminders (admins only)")]
    Stop,
    #[command(description = "bot functionality")]
    Help,
    #[command(description = "online lessons for children from Ukraine")]
    ChildrenLessons,
    #[command(
        description = "chats for german cities, you need to pass the name of the city",
        parse_with = parse_argument
    )]
    Cities(String),
    #[command(description = "chats for countries", parse_with = parse_argument)]
    Countries(String),
    #[command(description = "general evacuation info")]
    Evacuation,
    #[command(description = "evacuation chats for ukrainian cities", parse_with = parse_argument)]
    EvacuationCities(String),
    #[command(description = "Hryvnia exchange")]
    Hryvnia,
    #[command(description = "FAQ")]
    Handbook,
    #[command(description = "chat for legal help")]
    Legal,
    #[command(description = "chats for taxis and free rides")]
    Taxis,
    #[command(description = "medical help", parse_with = parse_argument)]
    Medical(String),
    #[command(rename = "socialhelp", description = "social help")]
    SocialHelp,
    #[command(description = "FAQ page by topic", parse_with = parse_argument)]
    Faq(String),
}

impl Command {
    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Help => "help",
            Command::ChildrenLessons => "children_lessons",
            Command::Cities(_) => "cities",
            Command::Countries(_) => "countries",
            Command::Evacuation => "evacuation",
            Command::EvacuationCities(_) => "evacuation_cities",
            Command::Hryvnia => "hryvnia",
            Command::Handbook => "handbook",
            Command::Legal => "legal",
            Command::Taxis => "taxis",
            Command::Medical(_) => "medical",
            Command::SocialHelp => "socialhelp",
            Command::Faq(_) => "faq",
        }
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, Command::Start | Command::Stop)
    }
}

/// Whole remainder of the command text, trimmed and lower-cased. Empty is allowed.
fn parse_argument(input: String) -> Result<(String,), ParseError> {
    Ok((input.trim().to_lowercase(),))
}

/// Command menu entries, sorted by name.
pub fn command_menu() -> Vec<BotCommand> {
    let mut commands = Command::bot_commands();
    commands.sort_by(|a, b| a.command.cmp(&b.command));
    commands
}
