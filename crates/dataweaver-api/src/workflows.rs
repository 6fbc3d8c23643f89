// Workflow HTTP routes: create, fetch, and execute against a record

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use dataweaver_core::{
    NewWorkflow, Record, Step, Workflow, WorkflowEngine, WorkflowRegistry,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::common::{engine_error_response, ErrorResponse};

/// App state for workflow routes
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<WorkflowRegistry>,
    pub engine: Arc<WorkflowEngine>,
}

impl AppState {
    pub fn new(registry: Arc<WorkflowRegistry>) -> Self {
        let engine = Arc::new(WorkflowEngine::new(registry.clone()));
        Self { registry, engine }
    }
}

/// Request to create a new workflow
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateWorkflowRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<Step>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub config: Map<String, Value>,
}

/// Response to workflow creation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateWorkflowResponse {
    pub id: u64,
    pub workflow: Workflow,
}

/// Request to run a workflow against a record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransformRequest {
    pub workflow_id: u64,
    #[schema(value_type = Object)]
    pub data: Record,
}

/// Result of a workflow run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransformResponse {
    #[schema(value_type = Object)]
    pub result: Record,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/workflows", post(create_workflow))
        .route("/v1/workflows/:id", get(get_workflow))
        .route("/v1/transform", post(transform_data))
        .with_state(state)
}

/// POST /v1/workflows - Create a new workflow
#[utoipa::path(
    post,
    path = "/v1/workflows",
    request_body = CreateWorkflowRequest,
    responses(
        (status = 201, description = "Workflow created successfully", body = CreateWorkflowResponse)
    ),
    tag = "workflows"
)]
pub async fn create_workflow(
    State(state): State<AppState>,
    Json(req): Json<CreateWorkflowRequest>,
) -> Result<(StatusCode, Json<CreateWorkflowResponse>), (StatusCode, Json<ErrorResponse>)> {
    let id = state.registry.create(NewWorkflow {
        name: req.name,
        description: req.description,
        steps: req.steps,
        config: req.config,
    });

    // Registered just above; the lookup only misses if the process is being
    // torn down mid-request.
    let workflow = state
        .registry
        .get(id)
        .map(|wf| wf.as_ref().clone())
        .map_err(engine_error_response)?;

    tracing::info!(workflow_id = id, steps = workflow.steps.len(), "Workflow created");
    Ok((StatusCode::CREATED, Json(CreateWorkflowResponse { id, workflow })))
}

/// GET /v1/workflows/{id} - Get workflow by id
#[utoipa::path(
    get,
    path = "/v1/workflows/{id}",
    params(
        ("id" = u64, Path, description = "Workflow id")
    ),
    responses(
        (status = 200, description = "Workflow found", body = Workflow),
        (status = 404, description = "Workflow not found", body = ErrorResponse)
    ),
    tag = "workflows"
)]
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Workflow>, (StatusCode, Json<ErrorResponse>)> {
    let workflow = state
        .registry
        .get(id)
        .map_err(engine_error_response)?;

    Ok(Json(workflow.as_ref().clone()))
}

/// POST /v1/transform - Execute a workflow against a record
#[utoipa::path(
    post,
    path = "/v1/transform",
    request_body = TransformRequest,
    responses(
        (status = 200, description = "Transformed record", body = TransformResponse),
        (status = 404, description = "Workflow not found", body = ErrorResponse),
        (status = 500, description = "Step execution failed", body = ErrorResponse)
    ),
    tag = "workflows"
)]
pub async fn transform_data(
    State(state): State<AppState>,
    Json(req): Json<TransformRequest>,
) -> Result<Json<TransformResponse>, (StatusCode, Json<ErrorResponse>)> {
    let result = state.engine.execute(req.workflow_id, &req.data).map_err(|e| {
        tracing::error!(workflow_id = req.workflow_id, "Workflow execution failed: {}", e);
        engine_error_response(e)
    })?;

    Ok(Json(TransformResponse { result }))
}
