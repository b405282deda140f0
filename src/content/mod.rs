//! Content module - posts, their store, bodies and rendering

mod markdown;
mod post;
mod seed;
pub mod service;
mod source;
mod store;

pub use markdown::MarkdownRenderer;
pub use post::{Post, PostForm};
pub use seed::seed_posts;
pub use service::{BlogService, BodyFetcher, PAGE_SIZE};
pub use source::{BodySource, DirBodySource, FetchError, HttpBodySource};
pub use store::ContentStore;
