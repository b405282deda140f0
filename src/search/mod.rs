//! Title search
//!
//! The search view keeps the last query and its results. Results are
//! recomputed from scratch on every input change.

use crate::content::Post;

/// Posts whose title contains `query`, ignoring case
pub fn filter_by_title<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect()
}

/// State behind the search page
#[derive(Debug, Clone, Default)]
pub struct SearchView {
    query: String,
    results: Vec<Post>,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a new query against `posts`.
    ///
    /// An empty query clears the results rather than listing everything.
    pub fn on_input(&mut self, query: &str, posts: &[Post]) {
        self.query = query.to_string();
        self.results = if query.is_empty() {
            Vec::new()
        } else {
            filter_by_title(posts, query).into_iter().cloned().collect()
        };
        tracing::debug!("Search {:?} matched {} posts", query, self.results.len());
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Post] {
        &self.results
    }
}
