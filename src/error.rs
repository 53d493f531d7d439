//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used by every handler.
//! `AppError` implements `actix_web::error::ResponseError`, so returning it from a
//! handler produces the matching status code and a JSON body of the form
//! `{"error": "<message>"}`.
//!
//! `From` conversions exist for `ValidationError` (400) and `StoreError` (500),
//! so handlers can use `?` on validator and store calls. Store failures are
//! logged with their cause and reported to the client with a generic message.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;

use crate::store::StoreError;
use crate::validation::ValidationError;

/// Message sent for every authentication failure, whatever its cause.
pub const PERMISSION_DENIED: &str = "permission denied";

/// Represents all errors a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or invalid credentials (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// A malformed or invalid request payload (HTTP 400).
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// The requested project or task does not exist (HTTP 404).
    #[error("Not Found: {0}")]
    NotFound(String),
    /// An internal failure such as hashing or signing (HTTP 500).
    /// The message is returned to the client, so keep it generic.
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
    /// The store failed (HTTP 500). The cause is logged, not returned.
    #[error("Database Error: {0}")]
    Database(#[from] StoreError),
}

impl AppError {
    pub fn permission_denied() -> Self {
        AppError::Unauthorized(PERMISSION_DENIED.into())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg) => msg.as_str(),
            AppError::Database(cause) => {
                log::error!("store failure: {}", cause);
                "internal server error"
            }
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Converts `ValidationError` into `AppError::BadRequest`, keeping the field message.
impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> AppError {
        AppError::BadRequest(error.to_string())
    }
}
