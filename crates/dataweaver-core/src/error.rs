// Error types for the DataWeaver engine

use thiserror::Error;

/// Errors from schema detection
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Input is not valid JSON
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Input parsed, but the top-level value is not an object
    #[error("top-level JSON value must be an object")]
    NotAnObject,
}

/// Errors from a single step handler
#[derive(Debug, Error)]
pub enum StepError {
    /// Step declares a type outside the recognized set
    #[error("unknown step type: {0}")]
    UnknownType(String),
}

/// Errors from the workflow registry and execution pipeline
#[derive(Debug, Error)]
pub enum EngineError {
    /// Referenced workflow id does not exist in the registry
    #[error("workflow {0} not found")]
    NotFound(u64),

    /// A step handler failed; execution stops at the failing step
    #[error("step {step_id} failed: {source}")]
    StepFailed {
        step_id: String,
        #[source]
        source: StepError,
    },
}

impl EngineError {
    /// Wrap a step failure with the id of the failing step
    pub fn step_failed(step_id: impl Into<String>, source: StepError) -> Self {
        EngineError::StepFailed {
            step_id: step_id.into(),
            source,
        }
    }
}
