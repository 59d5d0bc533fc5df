use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::auth::repository::InMemoryAccountStore;
use service::auth::{AuthConfig, AuthService};

use crate::gateway::Gateway;
use crate::observability;

pub mod auth;
pub mod ws;

/// Store backing the running server.
pub type Store = InMemoryAccountStore;

/// Shared by every route and every socket connection.
#[derive(Clone)]
pub struct ServerState {
    pub gateway: Arc<Gateway<Store>>,
}

impl ServerState {
    /// Fresh, empty account store wired into one auth service.
    pub fn new(cfg: AuthConfig) -> Self {
        let auth = Arc::new(AuthService::new(Arc::new(Store::new()), cfg));
        Self { gateway: Arc::new(Gateway::new(auth)) }
    }

    pub fn auth(&self) -> &Arc<AuthService<Store>> {
        self.gateway.auth()
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (axum::http::StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: socket gateway, HTTP auth, health and metrics.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .route("/player/register", post(auth::register))
        .route("/player/login", post(auth::login))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
