//! Search posts by title

use anyhow::Result;
use std::io::Write;

use crate::search::SearchView;
use crate::Blog;

pub fn run(blog: &Blog, query: &str, out: &mut impl Write) -> Result<()> {
    let service = blog.blog_service();
    let mut view = SearchView::new();
    view.on_input(query, service.list_all());

    writeln!(
        out,
        "Found {} results for '{}'",
        view.results().len(),
        view.query()
    )?;
    for post in view.results() {
        writeln!(out, "  {} [{}]", post.title, post.slug)?;
    }

    Ok(())
}
