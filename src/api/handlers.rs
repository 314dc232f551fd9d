//! HTTP request handlers for the rate engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_move_dates, compute_move_dates_from_shipment, entitlement_weight,
    fetch_base_linehaul_rate,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{MoveDatesSummary, RateEngineDate};

use super::request::{
    LinehaulRateRequest, MoveDatesRequest, RateEngineDateRequest, ShipmentDatesRequest,
};
use super::response::{ApiError, ApiErrorResponse, HealthResponse, LinehaulRateResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/rate-engine-date", post(rate_engine_date_handler))
        .route("/moves/dates", post(move_dates_handler))
        .route("/shipments/dates", post(shipment_dates_handler))
        .route("/linehaul-rate", post(linehaul_rate_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for POST /rate-engine-date.
///
/// Classifies a date into its performance and rate periods.
async fn rate_engine_date_handler(
    State(state): State<AppState>,
    payload: Result<Json<RateEngineDateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rate engine date request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result: EngineResult<RateEngineDate> =
        state.config().classifier().rate_engine_date(request.date);
    respond(correlation_id, "rate engine date", start_time, result)
}

/// Handler for POST /moves/dates.
///
/// Computes the date plan of a move from its orders and a resolved transit
/// distance.
async fn move_dates_handler(
    State(state): State<AppState>,
    payload: Result<Json<MoveDatesRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing move dates request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = move_dates(&state, &request);
    respond(correlation_id, "move dates", start_time, result)
}

fn move_dates(state: &AppState, request: &MoveDatesRequest) -> EngineResult<MoveDatesSummary> {
    if request.transit_distance_miles < 0 {
        return Err(EngineError::invalid_input(
            "transit_distance_miles",
            format!("must not be negative, got {}", request.transit_distance_miles),
        ));
    }

    let config = state.config();
    let weight = entitlement_weight(config.get_entitlement(request.orders.rank)?, &request.orders);
    compute_move_dates(
        config.calendar(),
        config.transit_times(),
        weight,
        request.transit_distance_miles,
        request.move_date,
        request.orders.report_by_date,
    )
}

/// Handler for POST /shipments/dates.
///
/// Computes the date plan of a shipment from its own estimates.
async fn shipment_dates_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShipmentDatesRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shipment dates request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = compute_move_dates_from_shipment(state.config().calendar(), &request.into());
    respond(correlation_id, "shipment dates", start_time, result)
}

/// Handler for POST /linehaul-rate.
///
/// Looks up the base linehaul rate of a shipment.
async fn linehaul_rate_handler(
    State(state): State<AppState>,
    payload: Result<Json<LinehaulRateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing linehaul rate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = fetch_base_linehaul_rate(
        state.rates(),
        request.distance_miles,
        request.weight_lbs,
        &request.rate_type,
        request.date,
    )
    .map(LinehaulRateResponse::from);
    respond(correlation_id, "linehaul rate", start_time, result)
}

/// Turns an operation result into a JSON response and logs the outcome.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &str,
    start_time: Instant,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = start_time.elapsed().as_micros(),
                "Request completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                client_error = err.is_client_error(),
                error = %err,
                "Request failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed serde error.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/tariff400ng").expect("Failed to load config");
        AppState::new(config).expect("Failed to build rate store")
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    async fn post_json(uri: &str, body: impl Into<Body>) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let response = create_router(create_test_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = read_body(response).await;
        assert_eq!(health.status, "ok");
    }

    #[tokio::test]
    async fn test_rate_engine_date_returns_periods() {
        let response = post_json("/rate-engine-date", r#"{"date": "2018-11-01"}"#).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let red: RateEngineDate = read_body(response).await;
        assert_eq!(red.rate_period.start, make_date("2018-10-01"));
        assert_eq!(red.rate_period.end, make_date("2019-05-14"));
        assert!(!red.rate_period.peak);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = post_json("/rate-engine-date", "{invalid json").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_json_field_returns_validation_error() {
        let response = post_json("/linehaul-rate", r#"{"distance_miles": 1500}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let response = create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/rate-engine-date")
                    .body(Body::from(r#"{"date": "2018-11-01"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_shipment_missing_estimate_returns_400() {
        let response =
            post_json("/shipments/dates", r#"{"requested_pickup_date": "2018-08-31"}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MISSING_FIELD");
        assert!(error.message.contains("EstimatedPackDays"));
    }

    #[tokio::test]
    async fn test_negative_transit_distance_returns_400() {
        let body = r#"{
            "orders": {"rank": "E_5", "report_by_date": "2018-08-01"},
            "move_date": "2018-07-05",
            "transit_distance_miles": -1
        }"#;
        let response = post_json("/moves/dates", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("transit_distance_miles"));
    }

    #[tokio::test]
    async fn test_unknown_rate_type_returns_404() {
        let body = r#"{
            "distance_miles": 1500,
            "weight_lbs": 4000,
            "rate_type": "Shorthaul",
            "date": "2018-06-01"
        }"#;
        let response = post_json("/linehaul-rate", body).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "RATE_NOT_FOUND");
        assert!(error.message.contains("type: Shorthaul"));
    }
}
