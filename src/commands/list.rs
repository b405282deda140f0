//! List site content

use anyhow::Result;
use std::io::Write;

use crate::helpers::post_date;
use crate::Blog;

/// List posts or tags
pub fn run(blog: &Blog, content_type: &str, out: &mut impl Write) -> Result<()> {
    let service = blog.blog_service();

    match content_type {
        "post" | "posts" => {
            let posts = service.list_all();
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts {
                writeln!(
                    out,
                    "  {} - {} [{}]",
                    post_date(post, "YYYY-MM-DD"),
                    post.title,
                    post.slug
                )?;
            }
        }
        "tag" | "tags" => {
            let tags = service.list_all_tags();
            writeln!(out, "Tags ({}):", tags.len())?;
            for tag in tags {
                let count = service
                    .list_all()
                    .iter()
                    .filter(|p| p.tags.contains(&tag))
                    .count();
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}
