use super::guidebook::{Guidebook, Section};
use super::index::normalize;
use std::collections::BTreeSet;

/// An immutable unit of searchable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub body: String,
    pub search_terms: BTreeSet<String>,
}

impl Article {
    /// Builds an article whose search terms cover its title, body and any extra keys.
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>, keys: &[&str]) -> Self {
        let title = title.into();
        let body = body.into();

        let mut search_terms: BTreeSet<String> = normalize(&title).into_iter().collect();
        search_terms.extend(normalize(&body));
        for key in keys {
            search_terms.extend(normalize(key));
        }

        Self {
            id: id.into(),
            title,
            body,
            search_terms,
        }
    }
}

/// Flattens the guidebook into articles. Order is registration order and
/// doubles as the tie-break priority during search.
pub fn build_articles(book: &Guidebook) -> Vec<Article> {
    let mut articles = Vec::new();

    for topic in &book.topics {
        articles.push(Article::new(
            format!("topic-{}", topic.key),
            topic.title.as_str(),
            topic.body.as_str(),
            &[topic.key.as_str()],
        ));
    }

    for section in Section::ALL {
        for (i, entry) in book.section(section).iter().enumerate() {
            let mut keys: Vec<&str> = entry.aliases.iter().map(String::as_str).collect();
            keys.push(section.label());
            articles.push(Article::new(
                format!("{}-{}", section.id_prefix(), i),
                format!("{}: {}", section.label(), entry.name),
                entry.render(),
                &keys,
            ));
        }
    }

    articles
}
