//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping is off: every
//! value placed in a context is either trusted configuration or escaped
//! on the Rust side before insertion.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::{NavLink, SiteConfig};
use crate::content::{Post, PostForm};
use crate::helpers::{escape_html, post_url, tag_list, time_tag};
use crate::theme::Theme;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("macros.html", include_str!("site/macros.html")),
            ("home.html", include_str!("site/home.html")),
            ("blogs.html", include_str!("site/blogs.html")),
            ("search.html", include_str!("site/search.html")),
            ("detail.html", include_str!("site/detail.html")),
            ("post_form.html", include_str!("site/post_form.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Context shared by every page: site settings, theme and page title
pub fn base_context(config: &SiteConfig, theme: Theme, page_title: &str) -> Context {
    let mut context = Context::new();
    context.insert("site", &SiteData::from_config(config));
    context.insert("theme", theme.as_str());
    context.insert("page_title", &escape_html(page_title));
    context
}

/// Site settings as seen by templates
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub author: String,
    pub description: String,
    pub nav_links: Vec<NavLink>,
    pub social_links: Vec<String>,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            author: config.author.clone(),
            description: config.description.clone(),
            nav_links: config.nav_links.clone(),
            social_links: config.social_links.clone(),
        }
    }
}

/// A post prepared for display. All fields are HTML-safe.
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub title: String,
    pub url: String,
    pub time_tag: String,
    pub description: String,
    pub tags: String,
}

impl PostCard {
    pub fn new(post: &Post, date_format: &str) -> Self {
        Self {
            title: escape_html(&post.title),
            url: escape_html(&post_url(&post.slug)),
            time_tag: time_tag(post, date_format),
            description: escape_html(&post.description),
            tags: tag_list(&post.tags),
        }
    }

    pub fn list(posts: &[Post], date_format: &str) -> Vec<Self> {
        posts.iter().map(|p| Self::new(p, date_format)).collect()
    }
}

/// Add/edit form values, escaped for attribute and textarea use
#[derive(Debug, Clone, Serialize)]
pub struct FormData {
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: String,
}

impl From<&PostForm> for FormData {
    fn from(form: &PostForm) -> Self {
        Self {
            title: escape_html(&form.title),
            description: escape_html(&form.description),
            content: escape_html(&form.content),
            tags: escape_html(&form.tags),
        }
    }
}
