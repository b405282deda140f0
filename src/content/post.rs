//! Post model and the add-post form

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Publication timestamp as written in the record (`2022-07-03` or RFC 3339)
    #[serde(rename = "pubDatetime")]
    pub pub_datetime: String,

    /// Post title
    pub title: String,

    /// Lookup key and asset file stem
    pub slug: String,

    /// Post tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Short summary shown in lists
    #[serde(default)]
    pub description: String,

    /// Inline Markdown body, only present on posts added at runtime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Post {
    /// Create a post without an inline body
    pub fn new(pub_datetime: &str, title: &str, slug: &str, tags: &[&str], description: &str) -> Self {
        Self {
            pub_datetime: pub_datetime.to_string(),
            title: title.to_string(),
            slug: slug.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: description.to_string(),
            content: None,
        }
    }

    /// Parse the publication timestamp into a calendar date.
    ///
    /// Only used for display; an unparseable value yields `None`.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let raw = self.pub_datetime.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    }
}

/// Fields of the add-post form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub description: String,
    pub content: String,
    /// Space separated tag list
    pub tags: String,
}

impl PostForm {
    /// Build a post stamped with `now`.
    ///
    /// The slug is the raw title; no slugification or uniqueness check.
    pub fn into_post(self, now: DateTime<Utc>) -> Post {
        let tags = self.tags.split_whitespace().map(str::to_string).collect();
        Post {
            pub_datetime: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            slug: self.title.clone(),
            title: self.title,
            tags,
            description: self.description,
            content: Some(self.content),
        }
    }

    /// Pre-fill the form from an existing post and its resolved body
    pub fn from_post(post: &Post, body: String) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            content: body,
            tags: post.tags.join(" "),
        }
    }
}
