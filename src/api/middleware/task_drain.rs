//! Holds responses until background tasks have finished (test mode only).

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Runs the handler, then waits for outstanding background tasks when the
/// coordinator is in wait mode. A no-op otherwise.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/{key}", get(redirect_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), task_drain::layer));
/// ```
pub async fn layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    state.tasks.settle().await;

    response
}
