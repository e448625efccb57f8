// handlers/public/auth.rs - token acquisition, no authentication required

use axum::extract::State;

use crate::api::format::AuthResponse;
use crate::api::state::AppState;
use crate::features::auth::{login, register, LoginCommand, RegisterCommand};
use crate::handlers::extract::AppJson;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /api/auth/register
///
/// ```json
/// { "email": "user@example.com", "password": "at least 8 chars" }
/// ```
pub async fn user_register(
    State(state): State<AppState>,
    AppJson(command): AppJson<RegisterCommand>,
) -> ApiResult<AuthResponse> {
    let response = register::handle(&state, command).await?;
    Ok(ApiResponse::success(response))
}

/// POST /api/auth/login
pub async fn session_login(
    State(state): State<AppState>,
    AppJson(command): AppJson<LoginCommand>,
) -> ApiResult<AuthResponse> {
    let response = login::handle(&state, command).await?;
    Ok(ApiResponse::success(response))
}
