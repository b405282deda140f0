//! Markdown body sources
//!
//! Post bodies are not stored in the post records. They live as
//! `<slug>.md` assets, either behind an HTTP server or in a local
//! directory.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Characters escaped when a slug is placed in a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Failure to obtain a post body
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("slug {0:?} cannot name an asset file")]
    InvalidSlug(String),
}

/// Somewhere Markdown bodies can be fetched from by slug
#[async_trait]
pub trait BodySource: Send + Sync {
    async fn fetch(&self, slug: &str) -> Result<String, FetchError>;
}

/// Fetches `GET <base_url>/assets/<slug>.md`
#[derive(Debug, Clone)]
pub struct HttpBodySource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBodySource {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to a default HTTP client without timeout: {}", e);
                reqwest::Client::new()
            });
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// URL of the asset holding `slug`'s body
    pub fn asset_url(&self, slug: &str) -> String {
        format!(
            "{}/assets/{}.md",
            self.base_url,
            utf8_percent_encode(slug, PATH_SEGMENT)
        )
    }
}

#[async_trait]
impl BodySource for HttpBodySource {
    async fn fetch(&self, slug: &str) -> Result<String, FetchError> {
        let url = self.asset_url(slug);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Http { url, source })
    }
}

/// Reads `<dir>/<slug>.md` from the local filesystem
#[derive(Debug, Clone)]
pub struct DirBodySource {
    dir: PathBuf,
}

impl DirBodySource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn asset_path(&self, slug: &str) -> Result<PathBuf, FetchError> {
        if slug.is_empty() || slug.contains(['/', '\\']) || slug == ".." || slug == "." {
            return Err(FetchError::InvalidSlug(slug.to_string()));
        }
        Ok(self.dir.join(format!("{}.md", slug)))
    }
}

#[async_trait]
impl BodySource for DirBodySource {
    async fn fetch(&self, slug: &str) -> Result<String, FetchError> {
        let path = self.asset_path(slug)?;
        tracing::debug!("Reading {:?}", path);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, Router};

    async fn serve_assets() -> String {
        async fn asset(Path(file): Path<String>) -> Result<String, StatusCode> {
            match file.as_str() {
                "hello.md" => Ok("# Hello".to_string()),
                "with space.md" => Ok("spaced".to_string()),
                _ => Err(StatusCode::NOT_FOUND),
            }
        }

        let app = Router::new().route("/assets/:file", get(asset));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_asset_url_encodes_slug() {
        let source = HttpBodySource::new("http://example.com/");
        assert_eq!(
            source.asset_url("mutable-imports"),
            "http://example.com/assets/mutable-imports.md"
        );
        assert_eq!(
            source.asset_url("Hello World/2"),
            "http://example.com/assets/Hello%20World%2F2.md"
        );
    }

    #[tokio::test]
    async fn test_http_fetch_ok() {
        let base = serve_assets().await;
        let source = HttpBodySource::new(&base);
        assert_eq!(source.fetch("hello").await.unwrap(), "# Hello");
        assert_eq!(source.fetch("with space").await.unwrap(), "spaced");
    }

    #[tokio::test]
    async fn test_http_fetch_404_is_status_error() {
        let base = serve_assets().await;
        let source = HttpBodySource::new(&base);
        match source.fetch("missing").await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_fetch_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let source = HttpBodySource::new(&format!("http://{}", addr));
        assert!(matches!(
            source.fetch("hello").await,
            Err(FetchError::Http { .. })
        ));
    }

    #[tokio::test]
    async fn test_dir_fetch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("post.md"), "body text").unwrap();
        let source = DirBodySource::new(dir.path());
        assert_eq!(source.fetch("post").await.unwrap(), "body text");
        assert!(matches!(
            source.fetch("nope").await,
            Err(FetchError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_dir_rejects_path_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirBodySource::new(dir.path());
        assert!(matches!(
            source.fetch("../secret").await,
            Err(FetchError::InvalidSlug(_))
        ));
        assert!(matches!(
            source.fetch("").await,
            Err(FetchError::InvalidSlug(_))
        ));
    }
}
