use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::auth::Claims;
use crate::error::AppError;

/// Caller identity taken from a verified token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
        }
    }
}

/// Rejects the request with 401 unless it carries a valid bearer token,
/// otherwise makes the caller available to handlers as `Extension<AuthUser>`.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&headers).map_err(|msg| {
        tracing::debug!("Rejected request to {}: {}", request.uri().path(), msg);
        AppError::unauthorized(msg)
    })?;

    let claims = state.tokens.validate(token).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        AppError::unauthorized("Invalid or expired token")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("Empty JWT token");
    }
    Ok(token)
}
