#![allow(clippy::panic)]

use refugee_help_bot::bot::commands::{command_menu, Command};
use teloxide::utils::command::BotCommands;

#[cfg(test)]
mod command_parsing_tests {
    use super::*;

    fn parse(input: &str) -> Command {
        match Command::parse(input, "refugeehelpbot") {
            Ok(cmd) => cmd,
            Err(e) => panic!("failed to parse {input:?}: {e}"),
        }
    }

    #[test]
    fn test_reminder_commands_parsing() {
        assert_eq!(parse("/start"), Command::Start);
        assert_eq!(parse("/stop"), Command::Stop);
    }

    #[test]
    fn test_topic_commands_parsing() {
        assert_eq!(parse("/help"), Command::Help);
        assert_eq!(parse("/children_lessons"), Command::ChildrenLessons);
        assert_eq!(parse("/evacuation"), Command::Evacuation);
        assert_eq!(parse("/hryvnia"), Command::Hryvnia);
        assert_eq!(parse("/handbook"), Command::Handbook);
        assert_eq!(parse("/legal"), Command::Legal);
        assert_eq!(parse("/taxis"), Command::Taxis);
        assert_eq!(parse("/socialhelp"), Command::SocialHelp);
    }

    #[test]
    fn test_argument_is_trimmed_and_lowercased() {
        assert_eq!(parse("/cities   Berlin  "), Command::Cities("berlin".into()));
        assert_eq!(parse("/countries POLAND"), Command::Countries("poland".into()));
        assert_eq!(parse("/medical Doctors"), Command::Medical("doctors".into()));
        assert_eq!(parse("/faq drive-EN"), Command::Faq("drive-en".into()));
    }

    #[test]
    fn test_argument_keeps_inner_spaces_and_cyrillic() {
        assert_eq!(
            parse("/evacuation_cities Кривий Ріг"),
            Command::EvacuationCities("кривий ріг".into())
        );
    }

    #[test]
    fn test_missing_argument_is_empty() {
        assert_eq!(parse("/cities"), Command::Cities(String::new()));
        assert_eq!(parse("/countries"), Command::Countries(String::new()));
        assert_eq!(parse("/medical"), Command::Medical(String::new()));
    }

    #[test]
    fn test_command_addressed_to_bot() {
        assert_eq!(parse("/cities@refugeehelpbot Hamburg"), Command::Cities("hamburg".into()));
        assert!(Command::parse("/cities@otherbot Hamburg", "refugeehelpbot").is_err());
    }

    #[test]
    fn test_unknown_command_fails() {
        assert!(Command::parse("/schedule", "refugeehelpbot").is_err());
        assert!(Command::parse("hello there", "refugeehelpbot").is_err());
    }

    #[test]
    fn test_only_reminder_commands_are_restricted() {
        assert!(Command::Start.is_restricted());
        assert!(Command::Stop.is_restricted());
        assert!(!Command::Help.is_restricted());
        assert!(!Command::Cities("berlin".into()).is_restricted());
    }

    #[test]
    fn test_command_menu_is_sorted_and_complete() {
        let menu = command_menu();
        assert_eq!(menu.len(), 15);

        let names: Vec<&str> = menu.iter().map(|c| c.command.trim_start_matches('/')).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        for expected in ["cities", "evacuation_cities", "socialhelp", "start", "stop", "faq"] {
            assert!(names.contains(&expected), "menu is missing {expected}");
        }
        assert!(menu.iter().all(|c| !c.description.is_empty()));
    }
}
