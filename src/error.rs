//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every handler and the authentication middleware report failures through it, and
//! `AppError` implements `actix_web::error::ResponseError` so each variant becomes an
//! HTTP response with a `{"error": "..."}` JSON body.
//!
//! The message carried by a variant is what the client sees. Handlers that fail on a
//! backend (storage, hashing, signing) log the underlying cause and pick a fixed,
//! generic message, so database error strings never reach the response body.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

use crate::auth::token::TokenError;

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to a specific type of error, carrying the message
/// returned to the client. These errors are then converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Represents an unauthorized access attempt (HTTP 401).
    /// Bad credentials, and missing, invalid or expired tokens.
    Unauthorized(String),
    /// Represents a client-side error due to a malformed request body (HTTP 400).
    BadRequest(String),
    /// Represents a request that collides with existing state (HTTP 409).
    /// Raised when signing up with a username that is already taken.
    Conflict(String),
    /// Represents an unexpected server-side error (HTTP 500).
    /// Hashing and token signing failures end up here.
    InternalServerError(String),
    /// Represents an error originating from the persistence layer (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl AppError {
    /// The message placed in the JSON body sent to the client.
    pub fn message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::InternalServerError(msg)
            | AppError::DatabaseError(msg) => msg,
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON error responses.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.message()
        }))
    }
}

/// Converts `TokenError` into `AppError`.
///
/// Every verification failure collapses to the same 401 so clients cannot tell an
/// expired token from a forged one. A signing failure is a server fault.
impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::Signing(detail) => {
                log::error!("token signing failed: {}", detail);
                AppError::InternalServerError("Could not generate token".into())
            }
            TokenError::InvalidSignature | TokenError::Malformed(_) | TokenError::Expired => {
                AppError::Unauthorized("Invalid token".into())
            }
        }
    }
}
