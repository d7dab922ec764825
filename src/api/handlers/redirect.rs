//! Handler for short key redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// # Request Flow
///
/// 1. Reject malformed keys with 400
/// 2. Check cache, fall back to the store on miss or cache error
/// 3. Expired or unknown keys return 404; expired records are purged in the background
/// 4. Return 301 Moved Permanently
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.link_service.resolve(&key).await?;

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, record.original_url)],
    ))
}
