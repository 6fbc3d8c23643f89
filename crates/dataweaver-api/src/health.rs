// Health endpoint
//
// Reports process liveness plus database reachability. The database is an
// optional collaborator: without DATABASE_URL the probe is disabled and the
// service still reports healthy.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;

/// App state for the health route
#[derive(Clone)]
pub struct AppState {
    pub pool: Option<PgPool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service status: "healthy" or "unhealthy".
    pub status: String,
    pub service: String,
    /// Database probe result: "connected", "disconnected", or "disabled".
    pub db: String,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .with_state(state)
}

/// GET /v1/health - Service and database health
#[utoipa::path(
    get,
    path = "/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, http_status, db) = match &state.pool {
        Some(pool) => match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => ("healthy", StatusCode::OK, "connected"),
            Err(e) => {
                tracing::warn!("Database health check failed: {}", e);
                ("unhealthy", StatusCode::SERVICE_UNAVAILABLE, "disconnected")
            }
        },
        None => ("healthy", StatusCode::OK, "disabled"),
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            service: "dataweaver".to_string(),
            db: db.to_string(),
        }),
    )
}
