//! In-memory content store

use super::seed::seed_posts;
use super::Post;

/// Ordered post records held for the lifetime of the process.
///
/// Only ever appended to. Nothing is written back anywhere.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    posts: Vec<Post>,
}

impl ContentStore {
    /// Create a store holding `posts` in the given order
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Create a store from the built-in post list
    pub fn from_seed() -> Self {
        Self::new(seed_posts())
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn push(&mut self, post: Post) {
        self.posts.push(post);
    }
}
