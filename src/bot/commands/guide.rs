//! Replies for the informational commands. Pure lookups over the guidebook.

use crate::bot::commands::Command;
use crate::content::guidebook::{Guidebook, Section, MISSING_TOPIC};

pub const CITY_PROMPT: &str = "Пожалуйста, уточните название города: /cities Name";

/// Text to send for an informational command; `None` for `/start` and `/stop`.
pub fn reply_for(book: &Guidebook, cmd: &Command) -> Option<String> {
    let text = match cmd {
        Command::Start | Command::Stop => return None,
        Command::Help => topic(book, "help"),
        Command::ChildrenLessons => topic(book, "children_lessons"),
        Command::Evacuation => topic(book, "evacuation"),
        Command::Hryvnia => topic(book, "hryvnia"),
        Command::Handbook => topic(book, "handbook"),
        Command::Legal => topic(book, "legal"),
        Command::SocialHelp => topic(book, "socialhelp"),
        Command::Faq(key) => topic(book, key),
        Command::Cities(name) if name.is_empty() => CITY_PROMPT.to_string(),
        Command::Cities(name) => lookup(book, Section::Cities, name),
        Command::Countries(name) => lookup(book, Section::Countries, name),
        Command::EvacuationCities(name) => lookup(book, Section::EvacuationCities, name),
        Command::Taxis => list_section(book, Section::Taxis),
        Command::Medical(name) => lookup(book, Section::Medical, name),
    };
    Some(text)
}

fn topic(book: &Guidebook, key: &str) -> String {
    book.topic(key)
        .map_or_else(|| MISSING_TOPIC.to_string(), |t| t.body.clone())
}

/// A named entry, the whole section when `name` is empty, or the list of
/// known names when nothing matches.
fn lookup(book: &Guidebook, section: Section, name: &str) -> String {
    if name.is_empty() {
        return list_section(book, section);
    }
    match book.find(section, name) {
        Some(entry) => entry.render(),
        None => {
            let known = book.names(section);
            if known.is_empty() {
                format!("Nothing found for '{name}'.")
            } else {
                format!("Nothing found for '{}'. Try one of: {}", name, known.join(", "))
            }
        }
    }
}

fn list_section(book: &Guidebook, section: Section) -> String {
    let entries = book.section(section);
    if entries.is_empty() {
        return format!("{}: no entries yet.", section.label());
    }
    entries
        .iter()
        .map(|e| e.render())
        .collect::<Vec<_>>()
        .join("\n\n")
}
