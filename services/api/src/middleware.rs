//! Authentication middleware for JWT token validation

use axum::{extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tracing::debug;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Authenticated user information
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Authentication middleware
///
/// Accepts only access tokens; refresh tokens are signed with another
/// secret and fail validation here.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(ApiError::Unauthorized("No token provided"))?;

    let claims = state
        .jwt_service
        .validate_access_token(bearer.token())
        .map_err(|e| {
            debug!("Rejected access token: {}", e);
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}
