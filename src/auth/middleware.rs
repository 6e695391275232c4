use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::{ApiError, Result};
use crate::AppState;

/// Bearer-token authentication middleware.
///
/// Verified claims are stored in request extensions for the
/// [`AuthenticatedUser`] extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return Err(ApiError::Unauthorized("Token is missing".to_string()));
    };

    let claims = state.jwt_service.decode_token(token)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Extractor for authenticated user claims
#[derive(Clone)]
pub struct AuthenticatedUser(pub Claims);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("No authentication found".to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}
