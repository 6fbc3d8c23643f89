// Workflow model
//
// Workflows are ordered lists of steps plus free-form configuration. They are
// immutable once created: the registry assigns id and created_at, and no
// update or delete operation exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The unit of data flowing through a workflow: field name -> JSON value.
/// Iteration order is first-seen key order.
pub type Record = Map<String, Value>;

/// Recognized step kinds; the dispatch tag for step execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Transform,
    Validate,
    Filter,
    Map,
}

impl StepKind {
    /// Interpret a wire-level type tag. Unknown tags yield `None`; the
    /// executor turns that into a typed error carrying the raw string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "transform" => Some(StepKind::Transform),
            "validate" => Some(StepKind::Validate),
            "filter" => Some(StepKind::Filter),
            "map" => Some(StepKind::Map),
            _ => None,
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepKind::Transform => write!(f, "transform"),
            StepKind::Validate => write!(f, "validate"),
            StepKind::Filter => write!(f, "filter"),
            StepKind::Map => write!(f, "map"),
        }
    }
}

/// One unit of data transformation within a workflow.
///
/// `step_type` stays a raw string: creation performs no validation, so a step
/// may carry any tag and only fails when executed. `next` is accepted and
/// echoed back but never consulted - execution is strictly list order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Step {
    pub id: String,
    #[serde(rename = "type")]
    pub step_type: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub config: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next: Vec<String>,
}

/// A stored workflow definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Workflow {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub steps: Vec<Step>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub config: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// Input to workflow creation; id and created_at are registry-assigned
#[derive(Debug, Clone)]
pub struct NewWorkflow {
    pub name: String,
    pub description: String,
    pub steps: Vec<Step>,
    pub config: Map<String, Value>,
}
