//! Error type returned by the authentication handlers

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::TokenError;
use serde_json::json;
use thiserror::Error;

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Request body failed validation
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    /// Email/password pair did not match
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing or rejected bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    /// Email already registered
    #[error("User already exists")]
    Conflict,

    /// Rate limiter tripped
    #[error("Too many login attempts")]
    TooManyRequests,

    #[error("User not found")]
    NotFound,

    #[error("Internal server error")]
    InternalServerError,
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::Unauthorized("Token expired"),
            TokenError::Invalid | TokenError::WrongType => AuthError::Unauthorized("Invalid token"),
            TokenError::Encoding(_) => AuthError::InternalServerError,
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(vec![rejection.body_text()])
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AuthError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation failed", "details": details }),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Invalid email or password" }),
            ),
            AuthError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, json!({ "error": message }))
            }
            AuthError::Conflict => (
                StatusCode::CONFLICT,
                json!({ "error": "User already exists" }),
            ),
            AuthError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": "Too many login attempts, try again later" }),
            ),
            AuthError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "User not found" })),
            AuthError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
