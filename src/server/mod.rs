//! HTTP API serving posts as JSON and the RSS feed

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::content::Post;
use crate::feed::RSS_CONTENT_TYPE;
use crate::BlogApi;

/// Server state
struct ServerState {
    app: BlogApi,
    started: Instant,
}

/// Error returned from handlers, rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Build the router over `app`
pub fn router(app: BlogApi) -> Router {
    let state = Arc::new(ServerState {
        app,
        started: Instant::now(),
    });

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/health/ready", get(ready_handler))
        .route("/health/live", get(live_handler))
        .route("/posts", get(list_posts_handler))
        .route("/posts/", get(empty_slug_handler))
        .route("/posts/:slug", get(get_post_handler))
        .route("/rss", get(rss_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start(app: &BlogApi, ip: &str, port: u16) -> Result<()> {
    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("Serving posts from {:?}", app.posts_dir);
    println!("Blog API running at http://{}:{}", ip, port);
    println!("Endpoints:");
    for (route, about) in ENDPOINTS {
        println!("  {:<20} - {}", route, about);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(app.clone())).await?;

    Ok(())
}

/// Routes and their descriptions, as listed by `GET /`
const ENDPOINTS: [(&str, &str); 7] = [
    ("GET /posts", "List all blog posts"),
    ("GET /posts/:slug", "Get a specific blog post"),
    ("GET /rss", "RSS feed"),
    ("GET /health", "Health check"),
    ("GET /health/ready", "Readiness check"),
    ("GET /health/live", "Liveness check"),
    ("GET /", "API information"),
];

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

async fn index_handler() -> Json<serde_json::Value> {
    let endpoints: serde_json::Map<String, serde_json::Value> = ENDPOINTS
        .iter()
        .map(|(route, about)| (route.to_string(), json!(about)))
        .collect();

    Json(json!({
        "message": "Blog API is running!",
        "endpoints": endpoints,
    }))
}

async fn health_handler(State(state): State<Arc<ServerState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": timestamp(),
        "uptime": format!("{:?}", state.started.elapsed()),
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn ready_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ready", "timestamp": timestamp() }))
}

async fn live_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "alive", "timestamp": timestamp() }))
}

/// List post metadata (no content)
async fn list_posts_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let store = state.app.store();
    let posts = blocking(move || store.list_posts(false))
        .await?
        .map_err(|e| {
            tracing::error!("{}", e);
            ApiError::internal(format!("Failed to load posts: {}", e))
        })?;

    Ok(Json(json!({
        "posts": posts,
        "count": posts.len(),
    })))
}

async fn empty_slug_handler() -> ApiError {
    ApiError::not_found("Post not found")
}

/// Full post by slug
async fn get_post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, ApiError> {
    if !is_valid_slug(&slug) {
        return Err(ApiError::not_found(format!("Post not found: {}", slug)));
    }

    let store = state.app.store();
    let lookup = slug.clone();
    let post = blocking(move || store.get_post(&lookup))
        .await?
        .map_err(|_| ApiError::not_found(format!("Post not found: {}", slug)))?;

    Ok(Json(post))
}

async fn rss_handler(State(state): State<Arc<ServerState>>) -> Result<Response, ApiError> {
    let app = state.app.clone();
    let feed = blocking(move || app.feed()).await?.map_err(|e| {
        tracing::error!("{}", e);
        ApiError::internal(format!("Failed to generate RSS feed: {}", e))
    })?;

    Ok(([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], feed.to_xml()).into_response())
}

/// Run directory scans and file reads on the blocking pool
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!("Blocking task failed: {}", e);
        ApiError::internal("Internal server error")
    })
}

/// Reject slugs that could escape the posts directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains("..")
        && !slug.contains(['/', '\\', '\0'])
}
