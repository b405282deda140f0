//! Print the Markdown body of a post

use anyhow::Result;
use std::io::Write;

use crate::Blog;

/// Print the body of `slug`.
///
/// A slug with no post is an error. A post whose body cannot be fetched
/// prints nothing.
pub async fn run(blog: &Blog, slug: &str, out: &mut impl Write) -> Result<()> {
    let service = blog.blog_service();
    let Some(post) = service.find_by_slug(slug) else {
        anyhow::bail!("No post with slug: {}", slug);
    };

    let body = service.resolve_body(post).await;
    if body.is_empty() {
        tracing::info!("Post {:?} has no body", slug);
    }
    write!(out, "{}", body)?;

    Ok(())
}
