//! HTML helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Simple HTML escaping
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Path of a post's detail page
///
/// # Examples
/// ```ignore
/// post_url("My new post") // -> "/blog/My%20new%20post"
/// ```
pub fn post_url(slug: &str) -> String {
    format!("/blog/{}", utf8_percent_encode(slug, SEGMENT))
}

/// Render tags as a list of badges
pub fn tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let items: String = tags
        .iter()
        .map(|t| format!(r#"<li class="tag">#{}</li>"#, escape_html(t)))
        .collect();
    format!(r#"<ul class="tags">{}</ul>"#, items)
}
