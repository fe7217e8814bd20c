//! Session handlers: login and password change

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::auth::{AuthResponse, ChangePasswordRequest, LoginRequest, Principal};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, ok};
use crate::messages::WsEvent;

/// Issue a session token
///
/// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = AuthResponse),
        (status = 400, description = "Malformed credentials"),
        (status = 401, description = "Invalid username or password")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    match state.auth.login(req).await {
        Ok(resp) => {
            tracing::info!(account_id = resp.account_id, "login succeeded");
            ok(resp)
        }
        Err(e) => ApiError::unauthorized(e.to_string()).into_err(),
    }
}

/// Change the caller's password
///
/// POST /api/v1/auth/password
#[utoipa::path(
    post,
    path = "/api/v1/auth/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Weak password or wrong old password"),
        (status = 401, description = "Authentication failed")
    ),
    security(("bearer_jwt" = [])),
    tag = "Auth"
)]
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<()> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    state
        .auth
        .change_password(principal.account_id, req)
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    // Other open sessions of this account must tear down
    state
        .registry
        .publish(principal.account_id, WsEvent::PasswordChanged {});

    ok(())
}
