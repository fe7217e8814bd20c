//! Wallet handlers: balance, history, peer transfer

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::account::AccountRepository;
use crate::auth::Principal;
use crate::error::WalletError;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, StrictDecimal, ok};
use crate::ledger::{Transaction, TransactionRepository};

/// Own-balance response
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceData {
    pub account_id: i64,
    #[schema(value_type = String, example = "70.00")]
    pub balance: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Peer transfer request
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Receiver username
    #[schema(example = "player7")]
    pub to: String,
    /// Amount - format validated by StrictDecimal
    #[schema(value_type = String, example = "30.00")]
    pub amount: StrictDecimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransferResponse {
    pub transaction: Transaction,
}

/// Get the caller's balance
///
/// GET /api/v1/wallet/balance
#[utoipa::path(
    get,
    path = "/api/v1/wallet/balance",
    responses(
        (status = 200, description = "Current balance", body = BalanceData),
        (status = 401, description = "Authentication failed")
    ),
    security(("bearer_jwt" = [])),
    tag = "Wallet"
)]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<BalanceData> {
    let account = AccountRepository::get_by_id(state.db.pool(), principal.account_id)
        .await
        .map_err(WalletError::from)?
        .ok_or(WalletError::UserNotFound)?;

    ok(BalanceData {
        account_id: account.account_id,
        balance: account.balance,
    })
}

/// Get the caller's transaction history, newest first
///
/// GET /api/v1/wallet/transactions?limit=50
#[utoipa::path(
    get,
    path = "/api/v1/wallet/transactions",
    params(("limit" = Option<i64>, Query, description = "Max rows, default 50, cap 200")),
    responses(
        (status = 200, description = "Transaction history", body = [Transaction]),
        (status = 401, description = "Authentication failed")
    ),
    security(("bearer_jwt" = [])),
    tag = "Wallet"
)]
pub async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Vec<Transaction>> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let history =
        TransactionRepository::list_for_account(state.db.pool(), principal.account_id, limit)
            .await
            .map_err(WalletError::from)?;

    ok(history)
}

/// Peer transfer to another account
///
/// POST /api/v1/wallet/transfer
///
/// super_admin/admin senders are unlimited issuers: their own balance is
/// neither checked nor debited.
#[utoipa::path(
    post,
    path = "/api/v1/wallet/transfer",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer committed", body = TransferResponse),
        (status = 400, description = "Invalid amount or target"),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "Receiver not found"),
        (status = 422, description = "Insufficient balance")
    ),
    security(("bearer_jwt" = [])),
    tag = "Wallet"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<TransferRequest>,
) -> ApiResult<TransferResponse> {
    let outcome = state
        .ledger
        .transfer(
            principal.account_id,
            &req.to,
            req.amount.inner(),
            principal.role.is_unlimited(),
        )
        .await
        .map_err(ApiError::from)?;

    // Push only after commit; unreachable clients reconcile by polling
    state.registry.dispatch(outcome.notices);

    ok(TransferResponse {
        transaction: outcome.transaction,
    })
}
