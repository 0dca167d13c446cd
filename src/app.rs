use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::database::Store;
use crate::handlers;

/// Shared per-request context. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

/// Full router: JSON API under /api, health probe, and the static front-end.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(handlers::health::get))
        .nest("/api", api_routes())
        .with_state(state)
        // Front-end
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .fallback_service(ServeDir::new(static_dir))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    use axum::routing::{post, put};
    use handlers::{items, sections, subsections};

    Router::new()
        .route("/data", get(handlers::data::get))
        .route("/sections", post(sections::post))
        .route("/sections/:id", put(sections::put).delete(sections::delete))
        .route("/subsections", post(subsections::post))
        .route(
            "/subsections/:id",
            put(subsections::put).delete(subsections::delete),
        )
        .route("/items", post(items::post))
        .route("/items/:id", put(items::put).delete(items::delete))
}
