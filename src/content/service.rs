//! Read, search and append operations over the content store

use indexmap::IndexSet;
use std::sync::Arc;

use super::source::{BodySource, FetchError};
use super::{ContentStore, Post};

/// Number of posts returned by [`BlogService::list_page`]
pub const PAGE_SIZE: usize = 9;

/// Access layer owning the content store and the body source
pub struct BlogService {
    store: ContentStore,
    source: Arc<dyn BodySource>,
}

impl BlogService {
    pub fn new(store: ContentStore, source: Arc<dyn BodySource>) -> Self {
        Self { store, source }
    }

    pub fn list_all(&self) -> &[Post] {
        self.store.posts()
    }

    /// First [`PAGE_SIZE`] posts.
    ///
    /// `page` is accepted but does not select anything: every page is the
    /// first one.
    pub fn list_page(&self, page: usize) -> &[Post] {
        tracing::trace!("list_page({}) ignores the page number", page);
        let posts = self.store.posts();
        &posts[..posts.len().min(PAGE_SIZE)]
    }

    /// First post in storage order whose slug is `slug`
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        self.store.posts().iter().find(|p| p.slug == slug)
    }

    /// Every tag used by any post, once each.
    ///
    /// Posts are walked last to first and tags are listed in reverse order
    /// of first sighting during that walk.
    pub fn list_all_tags(&self) -> Vec<String> {
        let seen: IndexSet<&str> = self
            .store
            .posts()
            .iter()
            .rev()
            .flat_map(|p| p.tags.iter().map(String::as_str))
            .collect();
        seen.into_iter().rev().map(str::to_string).collect()
    }

    /// Fetch a post body, reporting why it could not be obtained
    pub async fn try_fetch_body(&self, slug: &str) -> Result<String, FetchError> {
        self.bodies().try_fetch(slug).await
    }

    /// Fetch a post body, or an empty string on any failure
    pub async fn fetch_body(&self, slug: &str) -> String {
        self.bodies().fetch(slug).await
    }

    /// Inline body of `post` when it has one, otherwise the fetched asset
    pub async fn resolve_body(&self, post: &Post) -> String {
        self.bodies().resolve(post).await
    }

    /// Handle for fetching bodies without borrowing the service
    pub fn bodies(&self) -> BodyFetcher {
        BodyFetcher {
            source: Arc::clone(&self.source),
        }
    }

    /// Append a post. No validation and no duplicate check.
    pub fn submit_post(&mut self, post: Post) {
        tracing::info!("Adding post {:?}", post.slug);
        self.store.push(post);
    }
}

/// Body lookups detached from the store, usable after a lock on the
/// service has been released
#[derive(Clone)]
pub struct BodyFetcher {
    source: Arc<dyn BodySource>,
}

impl BodyFetcher {
    pub async fn try_fetch(&self, slug: &str) -> Result<String, FetchError> {
        self.source.fetch(slug).await
    }

    /// Empty string on any failure
    pub async fn fetch(&self, slug: &str) -> String {
        match self.try_fetch(slug).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("No body for {:?}: {}", slug, e);
                String::new()
            }
        }
    }

    pub async fn resolve(&self, post: &Post) -> String {
        match &post.content {
            Some(content) => content.clone(),
            None => self.fetch(&post.slug).await,
        }
    }
}
