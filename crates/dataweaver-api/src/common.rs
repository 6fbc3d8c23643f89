// Common DTOs for the public API

use axum::http::StatusCode;
use axum::Json;
use dataweaver_core::EngineError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn with_status(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Map an engine failure to its HTTP representation.
///
/// NotFound is a missing resource (404); StepFailed is an execution
/// failure (500). The step id travels in the message.
pub fn engine_error_response(err: EngineError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::StepFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    ErrorResponse::new(err.to_string()).with_status(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataweaver_core::StepError;

    #[test]
    fn not_found_maps_to_404() {
        let (status, body) = engine_error_response(EngineError::NotFound(3));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "workflow 3 not found");
    }

    #[test]
    fn step_failure_maps_to_500_and_names_the_step() {
        let err = EngineError::step_failed("s2", StepError::UnknownType("bogus".into()));
        let (status, body) = engine_error_response(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "step s2 failed: unknown step type: bogus");
    }
}
