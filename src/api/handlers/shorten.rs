//! Handler for the shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short key for a URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://www.google.com/",
///   "custom_short_key": "MyKey1"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "original_url": "https://www.google.com/",
///   "short_url": "http://localhost:8080/0LQfXx",
///   "expire_time": "2026-03-18T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 for an undecodable body, missing or invalid URL, or malformed custom key
/// - 406 if the custom key is already in use
/// - 500 if no free key could be derived or the store failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|e| AppError::InvalidPayload(e.body_text()))?;

    payload
        .validate()
        .map_err(|e| AppError::from_validation(&e))?;

    let shortened = state
        .link_service
        .shorten(&payload.url, payload.custom_short_key.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(shortened.into())))
}
