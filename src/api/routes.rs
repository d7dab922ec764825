//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short key
/// - `GET  /health`  - Component health
/// - `GET  /{key}`   - Redirect to the original URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{key}", get(redirect_handler))
}
