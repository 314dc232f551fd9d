//! Error types for the rate engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while classifying dates,
//! scheduling moves and looking up tariff rates.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{AddressRole, PeriodKind, RateDimension};

/// The main error type for the rate engine.
///
/// Every operation returns this error type. The engine never logs, retries or
/// swallows an error; the variant and its fields carry everything the caller
/// needs to build a response.
///
/// # Example
///
/// ```
/// use rate_engine::error::EngineError;
///
/// let error = EngineError::MissingRequiredField {
///     field: "RequestedPickupDate".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required field: RequestedPickupDate");
/// assert!(error.is_client_error());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but violates a table invariant.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        message: String,
    },

    /// An argument was malformed (negative count, empty address, no band).
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending argument.
        field: String,
        /// A description of what made the argument invalid.
        message: String,
    },

    /// An upstream record lacks a field needed for date computation.
    #[error("Missing required field: {field}")]
    MissingRequiredField {
        /// The name of the missing attribute.
        field: String,
    },

    /// No tariff row matched the banded query.
    #[error("No linehaul rate found for the {dimension}: {value}")]
    RateNotFound {
        /// The dimension that excluded every candidate row.
        dimension: RateDimension,
        /// The queried value for that dimension.
        value: String,
    },

    /// More than one tariff row matched the banded query.
    #[error(
        "Wanted 1 rate, found {count} rates for distance {distance_miles}, weight {weight_lbs}, type {rate_type}, date {date}"
    )]
    AmbiguousRate {
        /// How many rows matched.
        count: usize,
        /// Queried distance in miles.
        distance_miles: i64,
        /// Queried weight in pounds.
        weight_lbs: i64,
        /// Queried rate type.
        rate_type: String,
        /// Queried date.
        date: NaiveDate,
    },

    /// No period template matched a date.
    #[error("No {kind} period contains {date}")]
    PeriodNotFound {
        /// Which template list was searched.
        kind: PeriodKind,
        /// The date that was classified.
        date: NaiveDate,
    },

    /// Geocoding one side of a route failed.
    #[error("Geocoding {role} address '{address}' failed: {message}")]
    Geocode {
        /// Which address of the route failed.
        role: AddressRole,
        /// The address that was looked up.
        address: String,
        /// What the provider reported.
        message: String,
    },

    /// The driving distance lookup failed after both ends were geocoded.
    #[error("Route distance from {source_location} to {destination_location} failed: {message}")]
    RouteDistance {
        /// Source coordinates.
        source_location: String,
        /// Destination coordinates.
        destination_location: String,
        /// What the provider reported.
        message: String,
    },

    /// The tariff store failed to execute a query.
    #[error("Rate store error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Returns `true` when the error was caused by the caller's input rather
    /// than by configuration, data or a collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput { .. } | EngineError::MissingRequiredField { .. }
        )
    }

    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        EngineError::MissingRequiredField {
            field: field.to_string(),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for EngineError {
    fn from(error: rusqlite::Error) -> Self {
        EngineError::Storage {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
