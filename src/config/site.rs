//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,
    /// Paragraphs of the home page hero section
    pub hero: Vec<String>,
    pub nav_links: Vec<NavLink>,
    pub social_links: Vec<String>,

    // URL
    pub url: String,

    // Content
    pub assets_dir: String,
    pub body_source: BodySourceKind,

    // Storage
    pub storage_file: String,

    // Display
    pub date_format: String,

    // Server
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "my-blog-app".to_string(),
            author: "kalkidan getachew".to_string(),
            description: String::new(),
            hero: vec![
                "I am a software engineer based in Istanbul. I am currently working at Upstash."
                    .to_string(),
                "This website is my brain dump, where I stuff everything I can think of, mostly about JavaScript, TypeScript, and web technologies. Recently, a bit of Rust."
                    .to_string(),
            ],
            nav_links: vec![
                NavLink::new("posts", "/blogs"),
                NavLink::new("search", "/search"),
            ],
            social_links: vec![
                "https://github.com/Chaos-19".to_string(),
                "https://www.linkedin.com/in/kalkidan-getachew-bab252230".to_string(),
                "mailto:kalgetachew375@gmail.com?subject=feedback".to_string(),
                "http://www.twitter.com".to_string(),
            ],

            url: "http://localhost:4000".to_string(),

            assets_dir: "assets".to_string(),
            body_source: BodySourceKind::Dir,

            storage_file: ".blog/storage.json".to_string(),

            date_format: "MMM DD, YYYY".to_string(),

            port: 4000,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Where post bodies are fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodySourceKind {
    /// `<assets_dir>/<slug>.md` on disk
    Dir,
    /// `GET <url>/assets/<slug>.md`
    Http,
}

/// Entry of the navigation bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub name: String,
    pub url: String,
}

impl NavLink {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}
