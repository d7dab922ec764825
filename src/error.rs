//! User-facing error taxonomy and its HTTP mapping.
//!
//! Every variant renders as `{"error": "<message>"}` with a stable message.
//! Internal failures are logged with their full source chain and exposed only
//! as a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::repositories::StoreError;

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// The request body could not be decoded.
    #[error("Invalid request payload")]
    InvalidPayload(String),

    #[error("URL not given")]
    MissingUrl,

    #[error("Invalid URL given")]
    InvalidUrl,

    #[error("Invalid custom short key")]
    InvalidCustomKey,

    #[error("Short key not available to use")]
    KeyUnavailable,

    /// Every derivation attempt collided with an existing key.
    #[error("Something went wrong. Please try again.")]
    KeyGenerationExhausted { attempts: u32 },

    #[error("Invalid short key")]
    InvalidShortKey,

    #[error("Short Key not found")]
    ShortKeyNotFound,

    #[error("Something went wrong. Please try again.")]
    Persistence(#[source] StoreError),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPayload(_)
            | AppError::MissingUrl
            | AppError::InvalidUrl
            | AppError::InvalidCustomKey
            | AppError::InvalidShortKey => StatusCode::BAD_REQUEST,
            AppError::KeyUnavailable => StatusCode::NOT_ACCEPTABLE,
            AppError::ShortKeyNotFound => StatusCode::NOT_FOUND,
            AppError::KeyGenerationExhausted { .. } | AppError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Builds the response body for this error.
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }

    /// Maps request validation failures, checking `url` before the custom key.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let fields = errors.field_errors();

        if fields.contains_key("url") {
            AppError::MissingUrl
        } else if fields.contains_key("custom_short_key") {
            AppError::InvalidCustomKey
        } else {
            AppError::InvalidPayload(errors.to_string())
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Persistence(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Persistence(source) => {
                tracing::error!(error = %source, "Persistence failure");
            }
            AppError::KeyGenerationExhausted { attempts } => {
                tracing::error!(attempts, "Short key generation exhausted");
            }
            AppError::InvalidPayload(reason) => {
                tracing::debug!(reason = %reason, "Rejected request payload");
            }
            _ => {}
        }

        (status, Json(self.to_error_body())).into_response()
    }
}
