//! HTTP action server: the chatbot framework POSTs to `/webhook` whenever a
//! dialogue step needs one of the weather actions.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use weatherbot_core::{ActionCall, ActionError, ActionErrorBody, ActionRegistry};

#[derive(Clone)]
pub struct AppState {
    registry: Arc<ActionRegistry>,
}

#[derive(Debug, Serialize)]
struct ActionInfo {
    name: &'static str,
}

pub fn router(registry: Arc<ActionRegistry>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/actions", get(handle_actions))
        .route("/webhook", post(handle_webhook))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { registry })
}

pub async fn serve(addr: &str, registry: Arc<ActionRegistry>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("action server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(registry)).with_graceful_shutdown(shutdown_signal()).await?;

    info!("action server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
    }
}

/// GET /health
async fn handle_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET /actions: names of every registered action.
async fn handle_actions(State(state): State<AppState>) -> impl IntoResponse {
    let actions: Vec<ActionInfo> = state.registry.names().map(|name| ActionInfo { name }).collect();
    Json(actions)
}

/// POST /webhook: run the action named in `next_action`.
async fn handle_webhook(State(state): State<AppState>, Json(call): Json<ActionCall>) -> Response {
    match state.registry.run(&call).await {
        Ok(response) => Json(response).into_response(),
        Err(err @ ActionError::NotFound(_)) => {
            warn!("{err}");
            let body = ActionErrorBody { error: err.to_string(), action_name: call.next_action };
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
    }
}
