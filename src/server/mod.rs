//! HTTP server for the blog pages

use anyhow::Result;
use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{BlogService, BodyFetcher, MarkdownRenderer, Post, PostForm};
use crate::helpers::{escape_html, post_url, tag_list};
use crate::search::SearchView;
use crate::templates::{base_context, FormData, PostCard, TemplateRenderer};
use crate::theme::ThemeService;
use crate::Blog;

/// Server state
pub struct AppState {
    pub config: SiteConfig,
    pub service: RwLock<BlogService>,
    pub theme: RwLock<ThemeService>,
    pub markdown: MarkdownRenderer,
    pub templates: TemplateRenderer,
}

impl AppState {
    pub fn new(config: SiteConfig, service: BlogService, theme: ThemeService) -> Result<Self> {
        Ok(Self {
            config,
            service: RwLock::new(service),
            theme: RwLock::new(theme),
            markdown: MarkdownRenderer::new(),
            templates: TemplateRenderer::new()?,
        })
    }
}

/// Build the router; `/assets` is served from `assets_dir`
pub fn router(state: Arc<AppState>, assets_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/blogs", get(blogs_handler))
        .route("/search", get(search_handler))
        .route("/blog/add", get(add_form_handler).post(add_post_handler))
        .route("/blog/edit/:slug", get(edit_form_handler))
        .route("/blog/:slug", get(detail_handler))
        .route("/theme", get(theme_handler))
        .route("/theme/toggle", post(toggle_theme_handler))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(
        blog.config.clone(),
        blog.blog_service(),
        blog.theme_service()?,
    )?);
    let app = router(state, blog.assets_dir.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Render a template into a response with the given status
async fn render_page(
    state: &AppState,
    status: StatusCode,
    template: &str,
    title: &str,
    fill: impl FnOnce(&mut tera::Context),
) -> Response {
    let theme = state.theme.read().await.current();
    let mut context = base_context(&state.config, theme, title);
    fill(&mut context);

    match state.templates.render(template, &context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render {}: {:#}", template, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

async fn not_found_page(state: &AppState) -> Response {
    render_page(state, StatusCode::NOT_FOUND, "not_found.html", "Not found", |_| {}).await
}

async fn home_handler(State(state): State<Arc<AppState>>) -> Response {
    let posts = {
        let service = state.service.read().await;
        PostCard::list(service.list_page(1), &state.config.date_format)
    };
    render_page(&state, StatusCode::OK, "home.html", "Home page", |ctx| {
        ctx.insert("hero", &state.config.hero.iter().map(|p| escape_html(p)).collect::<Vec<_>>());
        ctx.insert("posts", &posts);
    })
    .await
}

async fn blogs_handler(State(state): State<Arc<AppState>>) -> Response {
    let (posts, tags) = {
        let service = state.service.read().await;
        (
            PostCard::list(service.list_all(), &state.config.date_format),
            tag_list(&service.list_all_tags()),
        )
    };
    render_page(&state, StatusCode::OK, "blogs.html", "Blog Post page", |ctx| {
        ctx.insert("posts", &posts);
        ctx.insert("tags", &tags);
    })
    .await
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let posts = {
        let service = state.service.read().await;
        let mut view = SearchView::new();
        view.on_input(&params.q, service.list_all());
        PostCard::list(view.results(), &state.config.date_format)
    };
    render_page(&state, StatusCode::OK, "search.html", "Search", |ctx| {
        ctx.insert("query", &escape_html(&params.q));
        ctx.insert("posts", &posts);
    })
    .await
}

/// Copy a post and a body fetcher out of the store. The read lock is
/// released before returning so fetches never hold it.
async fn lookup(state: &AppState, slug: &str) -> Option<(Post, BodyFetcher)> {
    let service = state.service.read().await;
    let post = service.find_by_slug(slug)?.clone();
    Some((post, service.bodies()))
}

async fn detail_handler(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let Some((post, bodies)) = lookup(&state, &slug).await else {
        tracing::debug!("No post with slug {:?}", slug);
        return not_found_page(&state).await;
    };
    let markdown = bodies.resolve(&post).await;

    let theme = state.theme.read().await.current();
    let body = match state.markdown.render(&markdown, theme) {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Failed to render body of {:?}: {:#}", slug, e);
            String::new()
        }
    };

    let card = PostCard::new(&post, &state.config.date_format);
    render_page(&state, StatusCode::OK, "detail.html", &post.title, |ctx| {
        ctx.insert("post", &card);
        ctx.insert("body", &body);
    })
    .await
}

async fn add_form_handler(State(state): State<Arc<AppState>>) -> Response {
    render_page(&state, StatusCode::OK, "post_form.html", "Add post", |ctx| {
        ctx.insert("heading", "Add post");
        ctx.insert("action", "/blog/add");
        ctx.insert("form", &FormData::from(&PostForm::default()));
    })
    .await
}

async fn add_post_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PostForm>,
) -> Response {
    let post = form.into_post(chrono::Utc::now());
    let location = post_url(&post.slug);
    state.service.write().await.submit_post(post);
    Redirect::to(&location).into_response()
}

async fn edit_form_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    let Some((post, bodies)) = lookup(&state, &slug).await else {
        return not_found_page(&state).await;
    };
    let form = PostForm::from_post(&post, bodies.resolve(&post).await);
    render_page(&state, StatusCode::OK, "post_form.html", "Edit post", |ctx| {
        ctx.insert("heading", "Edit post");
        ctx.insert("action", "");
        ctx.insert("form", &FormData::from(&form));
    })
    .await
}

async fn theme_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.theme.read().await.current().to_string()
}

async fn toggle_theme_handler(State(state): State<Arc<AppState>>) -> Response {
    if let Err(e) = state.theme.write().await.toggle() {
        tracing::error!("Failed to save theme: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save theme").into_response();
    }
    Redirect::to("/").into_response()
}

async fn not_found_handler(State(state): State<Arc<AppState>>) -> Response {
    not_found_page(&state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BodySource, ContentStore, DirBodySource, FetchError};
    use crate::theme::MemoryStore;
    use std::time::{Duration, Instant};

    /// Answers every slug after a fixed delay
    struct SlowSource(Duration);

    #[async_trait::async_trait]
    impl BodySource for SlowSource {
        async fn fetch(&self, _slug: &str) -> Result<String, FetchError> {
            tokio::time::sleep(self.0).await;
            Ok("slow body".to_string())
        }
    }

    struct TestServer {
        base: String,
        client: reqwest::Client,
        _assets: tempfile::TempDir,
    }

    impl TestServer {
        async fn start() -> Self {
            Self::start_with(|assets| -> Arc<dyn BodySource> { Arc::new(DirBodySource::new(assets)) })
                .await
        }

        async fn start_with(
            source: impl FnOnce(&std::path::Path) -> Arc<dyn BodySource>,
        ) -> Self {
            let assets = tempfile::tempdir().unwrap();
            std::fs::write(
                assets.path().join("mutable-imports.md"),
                "## Imports\n\n```javascript\nexport let x = 1;\n```\n",
            )
            .unwrap();

            let service = BlogService::new(ContentStore::from_seed(), source(assets.path()));
            let theme = ThemeService::new(Arc::new(MemoryStore::default()));
            let state = Arc::new(AppState::new(SiteConfig::default(), service, theme).unwrap());
            let app = router(state, assets.path().to_path_buf());

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            let client = reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap();
            Self {
                base: format!("http://{}", addr),
                client,
                _assets: assets,
            }
        }

        async fn get(&self, path: &str) -> (u16, String) {
            let response = self
                .client
                .get(format!("{}{}", self.base, path))
                .send()
                .await
                .unwrap();
            let status = response.status().as_u16();
            (status, response.text().await.unwrap())
        }
    }

    #[tokio::test]
    async fn test_home_lists_first_page() {
        let server = TestServer::start().await;
        let (status, html) = server.get("/").await;
        assert_eq!(status, 200);
        assert_eq!(html.matches(r#"class="post-card""#).count(), 9);
        assert!(!html.contains("design-patterns-js"));
        assert!(html.contains("Istanbul"));
    }

    #[tokio::test]
    async fn test_blogs_lists_everything() {
        let server = TestServer::start().await;
        let (status, html) = server.get("/blogs").await;
        assert_eq!(status, 200);
        assert_eq!(html.matches(r#"class="post-card""#).count(), 10);
        assert_eq!(html.matches("#javascript").count(), 11);
    }

    #[tokio::test]
    async fn test_search() {
        let server = TestServer::start().await;
        let (_, html) = server.get("/search?q=react").await;
        assert!(html.contains("Optimizing React applications for performance"));
        assert!(html.contains("Taming the complexity of state management in React"));
        assert_eq!(html.matches(r#"class="post-card""#).count(), 2);

        let (_, html) = server.get("/search?q=").await;
        assert_eq!(html.matches(r#"class="post-card""#).count(), 0);
        let (_, html) = server.get("/search").await;
        assert_eq!(html.matches(r#"class="post-card""#).count(), 0);
    }

    #[tokio::test]
    async fn test_detail_renders_markdown() {
        let server = TestServer::start().await;
        let (status, html) = server.get("/blog/mutable-imports").await;
        assert_eq!(status, 200);
        assert!(html.contains("<h2>Imports</h2>"));
        assert!(html.contains("highlight javascript"));
    }

    #[tokio::test]
    async fn test_detail_without_asset_has_empty_body() {
        let server = TestServer::start().await;
        let (status, html) = server.get("/blog/async-await-js").await;
        assert_eq!(status, 200);
        assert!(html.contains("Demystifying async/await in Javascript"));
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let server = TestServer::start().await;
        let (status, html) = server.get("/blog/unknown").await;
        assert_eq!(status, 404);
        assert!(html.contains("Page not found"));
        assert_eq!(server.get("/blog/edit/unknown").await.0, 404);
        assert_eq!(server.get("/nowhere").await.0, 404);
    }

    #[tokio::test]
    async fn test_add_post_then_view() {
        let server = TestServer::start().await;
        let (status, html) = server.get("/blog/add").await;
        assert_eq!(status, 200);
        assert!(html.contains(r#"action="/blog/add""#));

        let response = server
            .client
            .post(format!("{}/blog/add", server.base))
            .form(&[
                ("title", "My new post"),
                ("description", "fresh"),
                ("content", "# Brand new"),
                ("tags", "rust axum"),
            ])
            .send()
            .await
            .unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers()["location"].to_str().unwrap(),
            "/blog/My%20new%20post"
        );

        let (status, html) = server.get("/blog/My%20new%20post").await;
        assert_eq!(status, 200);
        assert!(html.contains("<h1>Brand new</h1>"));
        assert!(html.contains("#axum"));

        let (_, html) = server.get("/blogs").await;
        assert_eq!(html.matches(r#"class="post-card""#).count(), 11);

        let (status, html) = server.get("/blog/edit/My%20new%20post").await;
        assert_eq!(status, 200);
        assert!(html.contains(r#"value="My new post""#));
    }

    #[tokio::test]
    async fn test_edit_form_prefills_fetched_body() {
        let server = TestServer::start().await;
        let (status, html) = server.get("/blog/edit/mutable-imports").await;
        assert_eq!(status, 200);
        assert!(html.contains("## Imports"));
        assert!(html.contains("export let x = 1;"));
        assert!(html.contains(r#"value="javascript""#));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_slow_fetch_does_not_block_other_requests() {
        let server =
            TestServer::start_with(|_| -> Arc<dyn BodySource> {
            Arc::new(SlowSource(Duration::from_secs(3)))
        })
        .await;

        let client = server.client.clone();
        let detail_url = format!("{}/blog/mutable-imports", server.base);
        let detail = tokio::spawn(async move { client.get(detail_url).send().await });
        tokio::time::sleep(Duration::from_millis(200)).await;

        let client = server.client.clone();
        let add_url = format!("{}/blog/add", server.base);
        let add = tokio::spawn(async move {
            client
                .post(add_url)
                .form(&[("title", "Queued"), ("content", "body")])
                .send()
                .await
        });
        tokio::time::sleep(Duration::from_millis(200)).await;

        let started = Instant::now();
        let (status, html) = server.get("/blogs").await;
        assert_eq!(status, 200);
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(html.contains("Queued"));

        assert!(add.await.unwrap().unwrap().status().is_redirection());
        let detail = detail.await.unwrap().unwrap();
        assert_eq!(detail.status().as_u16(), 200);
        assert!(detail.text().await.unwrap().contains("slow body"));
    }

    #[tokio::test]
    async fn test_assets_served() {
        let server = TestServer::start().await;
        let (status, body) = server.get("/assets/mutable-imports.md").await;
        assert_eq!(status, 200);
        assert!(body.starts_with("## Imports"));
    }

    #[tokio::test]
    async fn test_theme_toggle() {
        let server = TestServer::start().await;
        assert_eq!(server.get("/theme").await.1, "light");

        let response = server
            .client
            .post(format!("{}/theme/toggle", server.base))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(server.get("/theme").await.1, "dark");

        let (_, html) = server.get("/").await;
        assert!(html.contains(r#"<body class="dark">"#));
    }
}
