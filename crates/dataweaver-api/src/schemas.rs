// Schema detection HTTP route

use axum::{http::StatusCode, routing::post, Json, Router};
use dataweaver_core::{detect_from_json, Schema};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::ErrorResponse;

/// Request to detect a schema from a raw data sample
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetectSchemaRequest {
    /// Raw sample to analyze, as a string.
    #[schema(example = "{\"name\":\"Alice\",\"age\":30}")]
    pub data: String,
    /// Sample format. Only "json" is supported.
    #[schema(example = "json")]
    pub format: String,
}

pub fn routes() -> Router {
    Router::new().route("/v1/schemas/detect", post(detect_schema))
}

/// POST /v1/schemas/detect - Infer a flat field-level schema from a JSON sample
#[utoipa::path(
    post,
    path = "/v1/schemas/detect",
    request_body = DetectSchemaRequest,
    responses(
        (status = 200, description = "Detected schema", body = Schema),
        (status = 400, description = "Unsupported format or malformed sample", body = ErrorResponse)
    ),
    tag = "schemas"
)]
pub async fn detect_schema(
    Json(req): Json<DetectSchemaRequest>,
) -> Result<Json<Schema>, (StatusCode, Json<ErrorResponse>)> {
    if req.format != "json" {
        return Err(
            ErrorResponse::new("only JSON format supported").with_status(StatusCode::BAD_REQUEST)
        );
    }

    let schema = detect_from_json(req.data.as_bytes()).map_err(|e| {
        tracing::warn!("Schema detection failed: {}", e);
        ErrorResponse::new(e.to_string()).with_status(StatusCode::BAD_REQUEST)
    })?;

    Ok(Json(schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    async fn post_detect(body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = routes()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/schemas/detect")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn detects_schema_from_a_json_sample() {
        let (status, body) = post_detect(json!({
            "data": r#"{"name":"Alice","age":30,"active":true,"ts":"2024-01-15T10:00:00Z"}"#,
            "format": "json"
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "detected_schema");

        let fields = body["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0]["name"], "name");
        assert_eq!(fields[0]["type"], "string");
        assert_eq!(fields[0]["nullable"], false);
        assert_eq!(fields[1]["type"], "number");
        assert_eq!(fields[2]["type"], "boolean");
        assert_eq!(fields[3]["type"], "timestamp");
    }

    #[tokio::test]
    async fn null_fields_omit_the_sample() {
        let (status, body) = post_detect(json!({
            "data": r#"{"x":null}"#,
            "format": "json"
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        let field = &body["fields"][0];
        assert_eq!(field["type"], "string");
        assert_eq!(field["nullable"], true);
        assert!(field.get("sample").is_none());
    }

    #[tokio::test]
    async fn non_json_format_is_rejected() {
        let (status, body) = post_detect(json!({
            "data": "a,b,c",
            "format": "csv"
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "only JSON format supported");
    }

    #[tokio::test]
    async fn malformed_sample_is_a_bad_request() {
        let (status, body) = post_detect(json!({
            "data": r#"{"a":"#,
            "format": "json"
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid JSON"));
    }
}
