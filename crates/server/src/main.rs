mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Json, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::{ClientConfig, ServerConfig};

#[derive(Clone)]
struct AppState {
    client: Arc<ClientConfig>,
    index_path: Arc<PathBuf>,
}

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Client-side routes answered with the SPA entry point.
const SPA_ROUTES: [&str; 5] = [
    "/",
    "/search",
    "/search/{id}",
    "/search/{lng}/{lat}",
    "/managers/newproperty",
];

/// Build the full application router.
fn build_app(cfg: &ServerConfig) -> Router {
    let state = AppState {
        client: Arc::new(cfg.client.clone()),
        index_path: Arc::new(cfg.dist_dir.join("index.html")),
    };

    // Static routers carry no state; merge them after the app state is attached
    let static_files = Router::new()
        .nest("/static", cached_static_router(&cfg.static_dir, CACHE_1DAY))
        .nest(
            "/assets",
            cached_static_router(&cfg.dist_dir.join("assets"), CACHE_IMMUTABLE),
        )
        .nest(
            "/wasm",
            cached_static_router(&cfg.dist_dir.join("wasm"), CACHE_IMMUTABLE),
        );

    let mut app = Router::new().route("/app-config.json", get(client_config));
    for path in SPA_ROUTES {
        app = app.route(path, get(serve_index));
    }

    app.with_state(state)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

async fn client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json((*state.client).clone())
}

async fn serve_index(State(state): State<AppState>) -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    match tokio::fs::read_to_string(state.index_path.as_path()).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::warn!(path = %state.index_path.display(), error = %e, "index.html unavailable");
            Html(
                r#"<!DOCTYPE html>
<html>
<head><title>Estate</title></head>
<body>
<h1>Estate</h1>
<p>Frontend not built yet. Run <code>dx build --release</code> in <code>crates/frontend</code>.</p>
</body>
</html>"#
                    .to_string(),
            )
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = match ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    if cfg.client.mapbox_access_token.is_empty() {
        tracing::warn!("MAPBOX_ACCESS_TOKEN is not set; the search map will not load tiles");
    }

    let app = build_app(&cfg);
    let addr = cfg.addr();
    tracing::info!(%addr, api = %cfg.client.api_base_url, dist = %cfg.dist_dir.display(), "serving frontend");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server stopped");
    }
}
