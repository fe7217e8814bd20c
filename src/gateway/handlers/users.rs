//! Managed-account handlers: provisioning, listing, disable/restore

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::account::{Account, AccountRepository, Role, can_manage};
use crate::auth::{AuthService, Principal};
use crate::error::WalletError;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, ok};
use crate::messages::WsEvent;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "player7")]
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    /// Defaults to `user`; must sit strictly below the caller's tier
    pub role: Option<Role>,
}

/// List accounts managed by the caller
///
/// GET /api/v1/users
///
/// super_admin sees every account; admin/sub_admin see the accounts they
/// provisioned. This is the pull side of the `users_update` push hint.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Managed accounts", body = [Account]),
        (status = 403, description = "Caller is not admin tier")
    ),
    security(("bearer_jwt" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Vec<Account>> {
    let pool = state.db.pool();
    let accounts = match principal.role {
        Role::SuperAdmin => AccountRepository::list_all(pool).await,
        Role::Admin | Role::SubAdmin => {
            AccountRepository::list_created_by(pool, principal.account_id).await
        }
        Role::User => return ApiError::from(WalletError::NotAuthorized).into_err(),
    }
    .map_err(WalletError::from)?;

    ok(accounts)
}

/// Provision a new account one or more tiers below the caller
///
/// POST /api/v1/users
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Account created", body = Account),
        (status = 400, description = "Invalid username/password or username taken"),
        (status = 403, description = "Requested role not below the caller's tier")
    ),
    security(("bearer_jwt" = [])),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Account> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let role = req.role.unwrap_or(Role::User);
    if !principal.role.may_create(role) {
        return ApiError::from(WalletError::NotAuthorized).into_err();
    }

    let hash = AuthService::hash_password(&req.password)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let account = AccountRepository::create(
        state.db.pool(),
        &req.username,
        &hash,
        role,
        Some(principal.account_id),
    )
    .await
    .map_err(|e| match &e {
        // 23505 = unique_violation on username
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            ApiError::bad_request("Username already taken")
        }
        _ => ApiError::from(WalletError::from(e)),
    })?;

    tracing::info!(
        creator = principal.account_id,
        account_id = account.account_id,
        role = %account.role,
        "account provisioned"
    );

    ok(account)
}

async fn managed_target(
    state: &AppState,
    principal: &Principal,
    target_id: i64,
) -> Result<Account, WalletError> {
    let target = AccountRepository::get_by_id(state.db.pool(), target_id)
        .await?
        .ok_or(WalletError::UserNotFound)?;
    if !can_manage(principal.account_id, principal.role, &target) {
        return Err(WalletError::NotAuthorized);
    }
    Ok(target)
}

/// Disable a managed account
///
/// POST /api/v1/users/{id}/disable
///
/// The target keeps its balance and history but can no longer authenticate
/// or take part in ledger operations. Live sessions are told to tear down.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/disable",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account disabled"),
        (status = 403, description = "No authority over target"),
        (status = 404, description = "Unknown account")
    ),
    security(("bearer_jwt" = [])),
    tag = "Users"
)]
pub async fn disable_user(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    let target = managed_target(&state, &principal, id).await?;

    AccountRepository::set_active(state.db.pool(), target.account_id, false)
        .await
        .map_err(WalletError::from)?;

    state
        .registry
        .publish(target.account_id, WsEvent::AccountDisabled {});
    state
        .registry
        .publish(principal.account_id, WsEvent::UsersUpdate {});

    ok(())
}

/// Restore a previously disabled managed account
///
/// POST /api/v1/users/{id}/restore
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/restore",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account restored"),
        (status = 403, description = "No authority over target"),
        (status = 404, description = "Unknown account")
    ),
    security(("bearer_jwt" = [])),
    tag = "Users"
)]
pub async fn restore_user(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    let target = managed_target(&state, &principal, id).await?;

    AccountRepository::set_active(state.db.pool(), target.account_id, true)
        .await
        .map_err(WalletError::from)?;

    state
        .registry
        .publish(principal.account_id, WsEvent::UsersUpdate {});

    ok(())
}
