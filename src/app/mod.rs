//! HTTP surface: upload endpoint, liveness check and the upload page.

pub mod model;
pub mod page;
pub mod upload;

use std::path::Path;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::Html;
use axum::routing::{get, post};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::app::model::AppConfig;

/// Builds the application router. Static files come from `web_dir` when it
/// holds an `index.html`, otherwise the built-in upload page is served.
pub fn router(config: &AppConfig, web_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route(
            "/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        );

    let web_index = web_dir.map(|dir| (dir, dir.join("index.html")));
    let app = match web_index {
        Some((dir, index)) if index.exists() => {
            tracing::info!(web_dir = %dir.display(), "serving static upload page");
            app.fallback_service(ServeDir::new(dir).not_found_service(ServeFile::new(index)))
        }
        _ => app.fallback(|| async { Html(page::UPLOAD_PAGE) }),
    };

    app.layer(TraceLayer::new_for_http())
}
