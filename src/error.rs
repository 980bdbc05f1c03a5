//! # Error Handling
//!
//! This module defines the application error type and how each error becomes an
//! HTTP response.
//!
//! ## Status code mapping
//! - Persistence: constraint violations → 409, pool/IO trouble → 503, anything else → 500
//! - Provider (OAuth) failures → 502
//! - `BadRequest` / `Unauthorized` / `Forbidden` → 400 / 401 / 403
//!
//! Missing movies are not errors: the store returns `Option` / `DeleteOutcome`
//! and the handlers answer 404 with a `null` body.

use crate::oauth::client::OAuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-wide error type
///
/// The `#[from]` attributes let handlers use `?` on sqlx and provider
/// results directly.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database errors (SQLx library errors)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The OAuth provider could not be reached or rejected a request
    #[error("OAuth provider error: {0}")]
    OAuth(#[from] OAuthError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// User is not logged in (or the provider refused the login)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Request is understood but refused, e.g. a forged OAuth callback
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(e) => {
                // Log detailed error for debugging (not shown to user)
                tracing::error!("Database error: {:?}", e);
                database_status(e)
            }
            AppError::OAuth(e) => {
                tracing::error!("OAuth provider error: {:?}", e);
                (StatusCode::BAD_GATEWAY, "Authentication provider error".to_string())
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Forbidden(_) => {
                tracing::warn!("{}", self);
                (StatusCode::FORBIDDEN, self.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Separate conflicts and transient failures from everything else.
fn database_status(e: &sqlx::Error) -> (StatusCode, String) {
    match e {
        sqlx::Error::Database(db)
            if db.is_unique_violation() || db.is_foreign_key_violation() || db.is_check_violation() =>
        {
            (StatusCode::CONFLICT, "Conflicting record".to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Database temporarily unavailable".to_string(),
        ),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string()),
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
