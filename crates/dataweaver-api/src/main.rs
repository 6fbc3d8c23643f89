// DataWeaver API server
// Decision: workflow storage is in-memory and volatile; the database is only
// probed for health, never used for workflow persistence

mod common;
mod config;
mod health;
mod schemas;
mod workflows;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use dataweaver_core::{Field, FieldType, Schema, Step, Workflow, WorkflowRegistry};
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::ApiConfig;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        schemas::detect_schema,
        workflows::create_workflow,
        workflows::get_workflow,
        workflows::transform_data,
    ),
    components(
        schemas(
            Schema, Field, FieldType,
            Step, Workflow,
            schemas::DetectSchemaRequest,
            workflows::CreateWorkflowRequest,
            workflows::CreateWorkflowResponse,
            workflows::TransformRequest,
            workflows::TransformResponse,
            health::HealthResponse,
            common::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health endpoints"),
        (name = "schemas", description = "Schema detection endpoints"),
        (name = "workflows", description = "Workflow management and execution endpoints")
    ),
    info(
        title = "DataWeaver API",
        version = "0.1.0",
        description = "API for schema detection and workflow-based record transformation",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dataweaver_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("dataweaver-api starting...");

    let config = ApiConfig::from_env();

    // Database pool for the health probe (optional - gracefully degrade when
    // DATABASE_URL is not set)
    let pool = match &config.database_url {
        Some(url) => match PgPoolOptions::new().max_connections(5).connect_lazy(url) {
            Ok(pool) => {
                tracing::info!("Database health probe configured");
                Some(pool)
            }
            Err(e) => {
                tracing::warn!("Invalid DATABASE_URL: {}. Database probe disabled.", e);
                None
            }
        },
        None => {
            tracing::info!("DATABASE_URL not set, database probe disabled");
            None
        }
    };

    // The registry is constructed once here and shared by handle; it holds the
    // only mutable state in the process.
    let registry = Arc::new(WorkflowRegistry::new());

    let app = build_app(registry, pool);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server exited cleanly");
    Ok(())
}

/// Build the full application router (extracted for testing)
fn build_app(registry: Arc<WorkflowRegistry>, pool: Option<sqlx::PgPool>) -> Router {
    Router::new()
        .merge(health::routes(health::AppState { pool }))
        .merge(schemas::routes())
        .merge(workflows::routes(workflows::AppState::new(registry)))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
