use super::article::Article;
use super::guidebook::Guidebook;
use std::collections::{HashMap, HashSet};

/// Lower-cases `text` and splits it into alphanumeric tokens.
///
/// Index build and query parsing share this function, so a query token
/// matches exactly the tokens produced from article text.
pub fn normalize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Read-only inverted index over the articles registered at boot.
#[derive(Debug, Default)]
pub struct ContentIndex {
    articles: Vec<Article>,
    postings: HashMap<String, Vec<usize>>,
}

impl ContentIndex {
    pub fn build(articles: Vec<Article>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(articles.len());

        for article in articles {
            if !seen.insert(article.id.clone()) {
                tracing::warn!("Skipping duplicate article id '{}'", article.id);
                continue;
            }
            kept.push(article);
        }

        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, article) in kept.iter().enumerate() {
            for term in &article.search_terms {
                postings.entry(term.clone()).or_default().push(pos);
            }
        }

        tracing::info!(
            "Content index built: {} articles, {} distinct terms",
            kept.len(),
            postings.len()
        );

        Self {
            articles: kept,
            postings,
        }
    }

    pub fn from_guidebook(book: &Guidebook) -> Self {
        Self::build(super::article::build_articles(book))
    }

    /// Positions of the articles containing `token`, in registration order.
    pub(crate) fn lookup(&self, token: &str) -> &[usize] {
        self.postings.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn article(&self, pos: usize) -> Option<&Article> {
        self.articles.get(pos)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
