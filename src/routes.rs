//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten` - Create a short key
//! - `GET  /health`  - Health check: DB, cache, background tasks
//! - `GET  /{key}`   - Short key redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Task drain** - Optionally waits for background tasks before responding
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{task_drain, tracing};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Routes with tracing and task drain layers, without path normalization.
pub fn router(state: AppState) -> Router {
    api::routes::public_routes()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            task_drain::layer,
        ))
        .with_state(state)
        .layer(tracing::layer())
}
