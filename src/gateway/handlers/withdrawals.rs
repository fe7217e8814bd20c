//! Withdrawal workflow handlers

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Principal;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResult, StrictDecimal, ok};
use crate::withdrawal::WithdrawalRequest;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWithdrawalRequest {
    /// Username of the account to be debited; that account must approve
    #[schema(example = "player7")]
    pub target: String,
    /// Amount - format validated by StrictDecimal
    #[schema(value_type = String, example = "15.00")]
    pub amount: StrictDecimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WithdrawalData {
    pub request: WithdrawalRequest,
}

/// Propose a withdrawal from a managed account
///
/// POST /api/v1/withdrawals
#[utoipa::path(
    post,
    path = "/api/v1/withdrawals",
    request_body = CreateWithdrawalRequest,
    responses(
        (status = 200, description = "Pending request created", body = WithdrawalData),
        (status = 400, description = "Invalid amount or target"),
        (status = 403, description = "No authority over target"),
        (status = 404, description = "Target not found"),
        (status = 422, description = "Target cannot cover the amount")
    ),
    security(("bearer_jwt" = [])),
    tag = "Withdrawals"
)]
pub async fn create_withdrawal(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateWithdrawalRequest>,
) -> ApiResult<WithdrawalData> {
    let (request, notices) = state
        .withdrawals
        .create(
            principal.account_id,
            principal.role,
            &req.target,
            req.amount.inner(),
        )
        .await?;

    state.registry.dispatch(notices);
    ok(WithdrawalData { request })
}

/// Approve a pending withdrawal (target account only)
///
/// POST /api/v1/withdrawals/{id}/approve
#[utoipa::path(
    post,
    path = "/api/v1/withdrawals/{id}/approve",
    params(("id" = Uuid, Path, description = "Withdrawal request id")),
    responses(
        (status = 200, description = "Approved and settled", body = WithdrawalData),
        (status = 403, description = "Caller is not the target"),
        (status = 404, description = "Unknown or already-settled request"),
        (status = 422, description = "Expired or target cannot cover the amount")
    ),
    security(("bearer_jwt" = [])),
    tag = "Withdrawals"
)]
pub async fn approve_withdrawal(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> ApiResult<WithdrawalData> {
    let (request, notices) = state.withdrawals.approve(id, principal.account_id).await?;

    state.registry.dispatch(notices);
    ok(WithdrawalData { request })
}

/// Reject a pending withdrawal (target account only)
///
/// POST /api/v1/withdrawals/{id}/reject
#[utoipa::path(
    post,
    path = "/api/v1/withdrawals/{id}/reject",
    params(("id" = Uuid, Path, description = "Withdrawal request id")),
    responses(
        (status = 200, description = "Rejected", body = WithdrawalData),
        (status = 403, description = "Caller is not the target"),
        (status = 404, description = "Unknown or already-settled request")
    ),
    security(("bearer_jwt" = [])),
    tag = "Withdrawals"
)]
pub async fn reject_withdrawal(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> ApiResult<WithdrawalData> {
    let (request, notices) = state.withdrawals.reject(id, principal.account_id).await?;

    state.registry.dispatch(notices);
    ok(WithdrawalData { request })
}

/// Requests awaiting the caller's approval
///
/// GET /api/v1/withdrawals/incoming
#[utoipa::path(
    get,
    path = "/api/v1/withdrawals/incoming",
    responses(
        (status = 200, description = "Pending requests targeting the caller", body = [WithdrawalRequest]),
        (status = 401, description = "Authentication failed")
    ),
    security(("bearer_jwt" = [])),
    tag = "Withdrawals"
)]
pub async fn list_incoming(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Vec<WithdrawalRequest>> {
    let requests = state
        .withdrawals
        .pending_for_target(principal.account_id)
        .await?;
    ok(requests)
}

/// Requests the caller proposed, newest first
///
/// GET /api/v1/withdrawals/sent
#[utoipa::path(
    get,
    path = "/api/v1/withdrawals/sent",
    responses(
        (status = 200, description = "Requests sent by the caller", body = [WithdrawalRequest]),
        (status = 401, description = "Authentication failed")
    ),
    security(("bearer_jwt" = [])),
    tag = "Withdrawals"
)]
pub async fn list_sent(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Vec<WithdrawalRequest>> {
    let requests = state.withdrawals.sent_by(principal.account_id).await?;
    ok(requests)
}
