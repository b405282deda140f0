//! blog-rs: a personal blog and portfolio server
//!
//! Posts live in an in-memory store seeded at startup. Their Markdown
//! bodies are fetched by slug from a directory or over HTTP, rendered
//! with pulldown-cmark and served through axum.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod search;
pub mod server;
pub mod templates;
pub mod theme;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use config::BodySourceKind;
use content::{BlogService, BodySource, ContentStore, DirBodySource, HttpBodySource};
use theme::{JsonFileStore, ThemeService};

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Directory holding `<slug>.md` assets
    pub assets_dir: std::path::PathBuf,
    /// Local key-value storage file
    pub storage_file: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let assets_dir = base_dir.join(&config.assets_dir);
        let storage_file = base_dir.join(&config.storage_file);

        Ok(Self {
            config,
            assets_dir,
            storage_file,
        })
    }

    /// Body source selected by `body_source` in the config
    pub fn body_source(&self) -> Arc<dyn BodySource> {
        match self.config.body_source {
            BodySourceKind::Dir => Arc::new(DirBodySource::new(&self.assets_dir)),
            BodySourceKind::Http => Arc::new(HttpBodySource::new(&self.config.url)),
        }
    }

    /// Access layer over a freshly seeded store
    pub fn blog_service(&self) -> BlogService {
        BlogService::new(ContentStore::from_seed(), self.body_source())
    }

    /// Theme preference backed by the local storage file, already initialized
    pub fn theme_service(&self) -> Result<ThemeService> {
        let mut service = ThemeService::new(Arc::new(JsonFileStore::new(&self.storage_file)));
        service.initialize()?;
        Ok(service)
    }
}
