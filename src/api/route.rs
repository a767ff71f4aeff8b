use crate::{
    api::response::ApiResponse,
    models::{AppInfo, RelayReport},
    state::AppState,
};
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

// Create router with all routes
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(app_info))
        .route("/transaction/update", post(update_transactions))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

// GET / handler
async fn app_info(State(state): State<Arc<AppState>>) -> ApiResponse<AppInfo> {
    ApiResponse::ok(AppInfo {
        name: state.config.app_name.clone(),
        version: state.config.app_version.clone(),
    })
}

// POST /transaction/update handler
async fn update_transactions(State(state): State<Arc<AppState>>) -> ApiResponse<RelayReport> {
    info!(
        "Processing transaction update for {} addresses",
        state.relay.addresses().len()
    );

    let report = state.relay.relay().await;
    if !report.is_success() {
        error!("Transaction update finished with {} errors", report.errors.len());
    }

    // Outcome is carried in the body; the HTTP status stays 200.
    ApiResponse::ok(report)
}
