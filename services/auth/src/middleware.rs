//! Middleware for JWT token validation and authentication

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tracing::debug;
use uuid::Uuid;

use crate::{AppState, error::AuthError};

/// Identity of the caller, taken from a validated access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Extract and validate the bearer access token
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AuthError::Unauthorized("No token provided"))?;

    let claims = state
        .jwt_service
        .validate_access_token(bearer.token())
        .map_err(|e| {
            debug!("Rejected access token: {}", e);
            AuthError::from(e)
        })?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}
