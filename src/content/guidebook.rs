use crate::error::{BotError, Result};
use serde::Deserialize;
use std::path::Path;

/// Missing FAQ page reply, kept in the language most readers of the chats use.
pub const MISSING_TOPIC: &str = "Нет такой страницы FAQ";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub title: String,
    pub url: String,
}

/// A named directory entry: a city, a country, a taxi service or a medical category.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Entry {
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.name.to_lowercase() == name || self.aliases.iter().any(|a| a.to_lowercase() == name)
    }

    /// Plain-text rendering used both for command replies and article bodies.
    pub fn render(&self) -> String {
        let mut out = self.name.clone();
        if let Some(note) = &self.note {
            out.push('\n');
            out.push_str(note);
        }
        for link in &self.links {
            out.push_str(&format!("\n{}: {}", link.title, link.url));
        }
        out
    }
}

/// A free-form FAQ page keyed by a short topic name.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Topic {
    pub key: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Cities,
    Countries,
    EvacuationCities,
    Taxis,
    Medical,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Cities,
        Section::Countries,
        Section::EvacuationCities,
        Section::Taxis,
        Section::Medical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Cities => "Chats",
            Section::Countries => "Country chats",
            Section::EvacuationCities => "Evacuation",
            Section::Taxis => "Taxis",
            Section::Medical => "Medical help",
        }
    }

    pub fn id_prefix(self) -> &'static str {
        match self {
            Section::Cities => "city",
            Section::Countries => "country",
            Section::EvacuationCities => "evac",
            Section::Taxis => "taxi",
            Section::Medical => "medical",
        }
    }
}

/// Static content loaded once at boot and shared read-only afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Guidebook {
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub cities: Vec<Entry>,
    #[serde(default)]
    pub countries: Vec<Entry>,
    #[serde(default)]
    pub evacuation_cities: Vec<Entry>,
    #[serde(default)]
    pub taxis: Vec<Entry>,
    #[serde(default)]
    pub medical: Vec<Entry>,
}

impl Guidebook {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BotError::Content(format!("cannot read guidebook {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| BotError::Content(format!("invalid guidebook: {e}")))
    }

    pub fn topic(&self, key: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.key.eq_ignore_ascii_case(key.trim()))
    }

    pub fn section(&self, section: Section) -> &[Entry] {
        match section {
            Section::Cities => &self.cities,
            Section::Countries => &self.countries,
            Section::EvacuationCities => &self.evacuation_cities,
            Section::Taxis => &self.taxis,
            Section::Medical => &self.medical,
        }
    }

    pub fn find(&self, section: Section, name: &str) -> Option<&Entry> {
        self.section(section).iter().find(|e| e.matches(name))
    }

    pub fn names(&self, section: Section) -> Vec<&str> {
        self.section(section).iter().map(|e| e.name.as_str()).collect()
    }
}
