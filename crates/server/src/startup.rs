use std::net::SocketAddr;

use axum::Router;
use service::auth::password::PasswordHashing;
use service::auth::validation::ValidationRules;
use service::auth::AuthConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Translate the `[auth]` config section into service configuration.
pub fn auth_config(cfg: &configs::AuthConfig) -> anyhow::Result<AuthConfig> {
    let rules = ValidationRules {
        username_min: cfg.username_min,
        username_max: cfg.username_max,
        password_min: cfg.password_min,
        password_max: cfg.password_max,
    };
    let hashing = PasswordHashing::new(cfg.hash_memory_kib, cfg.hash_iterations, cfg.hash_parallelism)?;
    Ok(AuthConfig { rules, hashing })
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and serve it until Ctrl+C.
pub async fn run(cfg: configs::AppConfig) -> anyhow::Result<()> {
    let state = ServerState::new(auth_config(&cfg.auth)?);
    let app = build_app(state);

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "lobby auth server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
