//! HTTP gateway: router assembly and serving

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::auth_middleware;
use crate::websocket::ws_handler;
use openapi::ApiDoc;
use state::AppState;

/// Assemble the full router. Public routes (health, login, the websocket
/// upgrade with its in-band handshake) sit outside the auth middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/v1/auth/password", post(handlers::change_password))
        .route("/api/v1/wallet/balance", get(handlers::get_balance))
        .route("/api/v1/wallet/transactions", get(handlers::get_transactions))
        .route("/api/v1/wallet/transfer", post(handlers::create_transfer))
        .route("/api/v1/admin/credit", post(handlers::credit))
        .route("/api/v1/admin/debit", post(handlers::debit))
        .route("/api/v1/withdrawals", post(handlers::create_withdrawal))
        .route("/api/v1/withdrawals/incoming", get(handlers::list_incoming))
        .route("/api/v1/withdrawals/sent", get(handlers::list_sent))
        .route(
            "/api/v1/withdrawals/{id}/approve",
            post(handlers::approve_withdrawal),
        )
        .route(
            "/api/v1/withdrawals/{id}/reject",
            post(handlers::reject_withdrawal),
        )
        .route(
            "/api/v1/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route("/api/v1/users/{id}/disable", post(handlers::disable_user))
        .route("/api/v1/users/{id}/restore", post(handlers::restore_user))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/v1/auth/login", post(handlers::login))
        .route("/ws", get(ws_handler))
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process exits
pub async fn run_gateway(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
