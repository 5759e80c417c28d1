//! Application router and shared context

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::qa::QaEngine;

/// Process-wide read-only context, built once at startup and passed to the
/// handlers explicitly
pub struct AppContext {
    pub engine: QaEngine,
}

/// Creates the application router: the page, the ask endpoint, and request
/// tracing
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/ask", post(handlers::ask))
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}
