//! Date helper functions

use chrono::NaiveDate;

use crate::content::Post;

/// Format a date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMM DD, YYYY") // -> "Jul 03, 2022"
/// ```
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Display date of a post, falling back to the raw stored value
pub fn post_date(post: &Post, format: &str) -> String {
    match post.published_on() {
        Some(date) => format_date(&date, format),
        None => post.pub_datetime.clone(),
    }
}

/// Generate a <time> HTML element for a post
pub fn time_tag(post: &Post, format: &str) -> String {
    match post.published_on() {
        Some(date) => format!(
            r#"<time datetime="{}">{}</time>"#,
            date.format("%Y-%m-%d"),
            format_date(&date, format)
        ),
        None => format!("<time>{}</time>", super::escape_html(&post.pub_datetime)),
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each unit
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
