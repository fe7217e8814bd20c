//! Administrative credit/debit handlers
//!
//! Issuance and destruction of funds by admin-tier accounts. Unbounded by
//! design: every adjustment still writes an immutable transaction row.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Principal;
use crate::error::WalletError;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResult, StrictDecimal, ok};
use crate::ledger::Transaction;

/// Credit/debit request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustRequest {
    /// Target username
    #[schema(example = "player7")]
    pub target: String,
    /// Amount - format validated by StrictDecimal
    #[schema(value_type = String, example = "20.00")]
    pub amount: StrictDecimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdjustResponse {
    pub transaction: Transaction,
}

fn require_admin_tier(principal: &Principal) -> Result<(), WalletError> {
    if !principal.role.is_admin_tier() {
        return Err(WalletError::NotAuthorized);
    }
    Ok(())
}

/// Credit a target account (money creation)
///
/// POST /api/v1/admin/credit
#[utoipa::path(
    post,
    path = "/api/v1/admin/credit",
    request_body = AdjustRequest,
    responses(
        (status = 200, description = "Credit committed", body = AdjustResponse),
        (status = 400, description = "Invalid amount"),
        (status = 403, description = "Caller is not admin tier"),
        (status = 404, description = "Target not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Admin"
)]
pub async fn credit(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<AdjustRequest>,
) -> ApiResult<AdjustResponse> {
    require_admin_tier(&principal)?;

    let outcome = state
        .ledger
        .credit(principal.account_id, &req.target, req.amount.inner())
        .await?;

    state.registry.dispatch(outcome.notices);
    ok(AdjustResponse {
        transaction: outcome.transaction,
    })
}

/// Debit a target account (money destruction; the admin's balance is untouched)
///
/// POST /api/v1/admin/debit
#[utoipa::path(
    post,
    path = "/api/v1/admin/debit",
    request_body = AdjustRequest,
    responses(
        (status = 200, description = "Debit committed", body = AdjustResponse),
        (status = 400, description = "Invalid amount or target"),
        (status = 403, description = "Caller is not admin tier"),
        (status = 404, description = "Target not found"),
        (status = 422, description = "Insufficient balance")
    ),
    security(("bearer_jwt" = [])),
    tag = "Admin"
)]
pub async fn debit(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<AdjustRequest>,
) -> ApiResult<AdjustResponse> {
    require_admin_tier(&principal)?;

    let outcome = state
        .ledger
        .debit(principal.account_id, &req.target, req.amount.inner())
        .await?;

    state.registry.dispatch(outcome.notices);
    ok(AdjustResponse {
        transaction: outcome.transaction,
    })
}
