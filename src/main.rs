//! Tiered Wallet server entry point
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌───────────┐    ┌──────────┐
//! │  Config  │───▶│ Postgres  │───▶│  Gateway  │───▶│ WS push  │
//! │  (YAML)  │    │ (ledger)  │    │ (axum)    │    │ (bus)    │
//! └──────────┘    └───────────┘    └───────────┘    └──────────┘
//! ```
//!
//! Every balance mutation commits in PostgreSQL first; pushes are
//! dispatched after commit and never affect the operation's outcome.

use std::sync::Arc;

use tiered_wallet::auth::AuthService;
use tiered_wallet::config::AppConfig;
use tiered_wallet::db::Database;
use tiered_wallet::gateway::{run_gateway, state::AppState};
use tiered_wallet::logging::init_logging;
use tiered_wallet::withdrawal::run_sweeper;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = init_logging(&config);

    tracing::info!("Starting tiered-wallet in {} mode", env);

    let db = Arc::new(Database::connect(&config.postgres_url).await?);
    db.ensure_schema().await?;

    let auth = Arc::new(AuthService::new(
        db.pool().clone(),
        config.auth.jwt_secret.clone(),
        config.auth.token_ttl_hours,
    ));

    let state = Arc::new(AppState::new(
        db,
        auth,
        config.withdrawal.expiry_secs,
    ));

    if config.withdrawal.sweep_enabled {
        let sweeper = state.withdrawals.clone();
        let interval = config.withdrawal.sweep_interval_secs;
        tokio::spawn(async move {
            run_sweeper(sweeper, interval).await;
        });
    }

    let port = get_port_override().unwrap_or(config.gateway.port);
    run_gateway(state, &config.gateway.host, port).await
}
