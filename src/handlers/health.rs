// src/handlers/health.rs

use axum::{extract::State, Json};

use crate::{config::AppState, models::health::HealthStatus};

// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Estado de la conexión con el document store", body = HealthStatus))
)]
pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthStatus> {
    let state = app_state.store.connection_state().await;
    Json(HealthStatus::from(state))
}
