//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::account::{Account, Role};
use crate::auth::{AuthResponse, ChangePasswordRequest, LoginRequest};
use crate::gateway::handlers::HealthResponse;
use crate::gateway::handlers::admin::{AdjustRequest, AdjustResponse};
use crate::gateway::handlers::users::CreateUserRequest;
use crate::gateway::handlers::wallet::{BalanceData, TransferRequest, TransferResponse};
use crate::gateway::handlers::withdrawals::{CreateWithdrawalRequest, WithdrawalData};
use crate::ledger::{Transaction, TxKind};
use crate::withdrawal::{WithdrawalRequest, WithdrawalStatus};

/// Bearer JWT security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token from POST /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tiered Wallet API",
        version = "1.0.0",
        description = "Shared-balance wallet with a tiered user hierarchy, two-party withdrawal approval and realtime WebSocket push."
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        // Public
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::auth::login,
        // Session
        crate::gateway::handlers::auth::change_password,
        // Wallet
        crate::gateway::handlers::wallet::get_balance,
        crate::gateway::handlers::wallet::get_transactions,
        crate::gateway::handlers::wallet::create_transfer,
        // Admin ledger
        crate::gateway::handlers::admin::credit,
        crate::gateway::handlers::admin::debit,
        // Withdrawals
        crate::gateway::handlers::withdrawals::create_withdrawal,
        crate::gateway::handlers::withdrawals::approve_withdrawal,
        crate::gateway::handlers::withdrawals::reject_withdrawal,
        crate::gateway::handlers::withdrawals::list_incoming,
        crate::gateway::handlers::withdrawals::list_sent,
        // Managed accounts
        crate::gateway::handlers::users::list_users,
        crate::gateway::handlers::users::create_user,
        crate::gateway::handlers::users::disable_user,
        crate::gateway::handlers::users::restore_user,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            AuthResponse,
            ChangePasswordRequest,
            BalanceData,
            TransferRequest,
            TransferResponse,
            AdjustRequest,
            AdjustResponse,
            CreateWithdrawalRequest,
            WithdrawalData,
            CreateUserRequest,
            Account,
            Role,
            Transaction,
            TxKind,
            WithdrawalRequest,
            WithdrawalStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Public", description = "Unauthenticated endpoints"),
        (name = "Auth", description = "Session management"),
        (name = "Wallet", description = "Balance, history and peer transfers"),
        (name = "Admin", description = "Administrative credit/debit"),
        (name = "Withdrawals", description = "Two-party withdrawal approval"),
        (name = "Users", description = "Managed-account provisioning"),
    )
)]
pub struct ApiDoc;
