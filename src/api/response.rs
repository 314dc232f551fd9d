//! Response types for the rate engine API.
//!
//! This module defines the success bodies that are not plain domain types,
//! the error response structure, and the mapping from [`EngineError`] to
//! HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::Cents;

/// Response body for `/linehaul-rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinehaulRateResponse {
    /// The rate in cents.
    pub rate_cents: Cents,
    /// The rate in dollars.
    pub rate_dollars: Decimal,
}

impl From<Cents> for LinehaulRateResponse {
    fn from(rate: Cents) -> Self {
        Self {
            rate_cents: rate,
            rate_dollars: rate.to_dollars(),
        }
    }
}

/// Response body for `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the server is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing field error response.
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::with_details(
            "MISSING_FIELD",
            format!("Missing required field: {}", field),
            format!("The record has no value for '{}'", field),
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidInput { field, .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("The value of '{}' cannot be used", field),
                ),
            ),
            EngineError::MissingRequiredField { field } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::missing_field(field),
            ),
            EngineError::RateNotFound { dimension, value } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "RATE_NOT_FOUND",
                    message,
                    format!("No tariff row covers the {} {}", dimension, value),
                ),
            ),
            EngineError::AmbiguousRate { count, .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "AMBIGUOUS_RATE",
                    message,
                    format!("{} overlapping tariff rows match the query", count),
                ),
            ),
            EngineError::PeriodNotFound { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("PERIOD_NOT_FOUND", message),
            ),
            EngineError::Geocode { role, .. } => ApiErrorResponse::new(
                StatusCode::BAD_GATEWAY,
                ApiError::with_details(
                    "GEOCODE_ERROR",
                    message,
                    format!("The {} address could not be located", role),
                ),
            ),
            EngineError::RouteDistance { .. } => ApiErrorResponse::new(
                StatusCode::BAD_GATEWAY,
                ApiError::new("ROUTE_ERROR", message),
            ),
            EngineError::Storage { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("STORAGE_ERROR", message),
            ),
        }
    }
}
