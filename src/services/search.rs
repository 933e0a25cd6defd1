use crate::content::{normalize, Article, ContentIndex};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Telegram accepts at most 50 results per inline answer.
pub const MAX_RESULTS: usize = 50;

#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub article: &'a Article,
    pub score: usize,
}

/// Ranked lookups over the immutable content index.
#[derive(Debug, Clone)]
pub struct KnowledgeSearch {
    index: Arc<ContentIndex>,
    max_results: usize,
}

impl KnowledgeSearch {
    pub fn new(index: Arc<ContentIndex>) -> Self {
        Self::with_limit(index, MAX_RESULTS)
    }

    pub fn with_limit(index: Arc<ContentIndex>, max_results: usize) -> Self {
        Self { index, max_results }
    }

    /// Returns articles ordered by the number of distinct query tokens they
    /// contain, ties broken by registration order. Each article appears once.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        let tokens: BTreeSet<String> = normalize(query).into_iter().collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut matches: HashMap<usize, usize> = HashMap::new();
        for token in &tokens {
            for &pos in self.index.lookup(token) {
                *matches.entry(pos).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(usize, usize)> = matches.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(self.max_results);

        ranked
            .into_iter()
            .filter_map(|(pos, score)| {
                self.index
                    .article(pos)
                    .map(|article| SearchHit { article, score })
            })
            .collect()
    }
}
