//! HTTP request handlers for the settlement API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_settlement;
use crate::models::SettlementInput;

use super::request::SettlementRequest;
use super::response::{ApiError, ApiErrorResponse, SettlementResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/settlements/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for POST /settlements/calculate.
///
/// Accepts settlement inputs and returns the calculated settlement with its
/// breakdown. Nothing is persisted.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SettlementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settlement request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let employee_id = request.employee_id.clone();
    let input: SettlementInput = request.into();

    let start_time = Instant::now();
    match calculate_settlement(&input, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = employee_id.as_deref().unwrap_or_default(),
                free_zone_rule = %result.free_zone_rule,
                total_settlement = %result.total_settlement,
                net_payable_by_employee = result.is_net_payable_by_employee(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Settlement calculated"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(SettlementResponse::new(employee_id, result)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Settlement calculation rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Well-formed JSON whose values do not fit the request shape.
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    async fn post_json(body: &str) -> (StatusCode, serde_json::Value) {
        let router = create_router(AppState::default());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/settlements/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let (status, body) = post_json(
            r#"{
                "employee_id": "emp_001",
                "service_start": "2019-01-01",
                "service_end": "2024-01-01",
                "monthly_wage": "9000"
            }"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employee_id"], "emp_001");
        let response: SettlementResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.result.gratuity_amount, dec("31500"));
    }

    #[tokio::test]
    async fn test_syntax_error_returns_malformed_json() {
        let (status, body) = post_json("{invalid json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_wage_returns_validation_error() {
        let (status, body) = post_json(r#"{"service_start": "2019-01-01"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("monthly_wage"));
    }

    #[tokio::test]
    async fn test_unknown_rule_returns_validation_error() {
        let (status, body) =
            post_json(r#"{"monthly_wage": "9000", "free_zone_rule": "jafza"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("jafza"));
    }

    #[tokio::test]
    async fn test_engine_error_response_is_json() {
        let router = create_router(AppState::default());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/settlements/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"service_start": "2024-01-02", "service_end": "2024-01-01", "monthly_wage": "9000"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(AppState::default());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/settlements/calculate")
                    .body(Body::from(r#"{"monthly_wage": "9000"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
