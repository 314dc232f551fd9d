//! Request types for the rate engine API.
//!
//! This module defines the JSON request bodies of the POST endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CONUS_LINEHAUL, Orders, Shipment};

/// Request body for `/rate-engine-date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateEngineDateRequest {
    /// The date to classify.
    pub date: NaiveDate,
}

/// Request body for `/moves/dates`.
///
/// The transit distance is resolved by the caller; this endpoint does not
/// geocode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveDatesRequest {
    /// The orders of the move.
    pub orders: Orders,
    /// The requested pickup date.
    pub move_date: NaiveDate,
    /// Driving distance between the duty stations.
    pub transit_distance_miles: i64,
}

/// Request body for `/shipments/dates`.
///
/// All fields are optional so that a missing estimate is reported by name
/// instead of as a JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipmentDatesRequest {
    /// The requested pickup date.
    #[serde(default)]
    pub requested_pickup_date: Option<NaiveDate>,
    /// Estimated pack days.
    #[serde(default)]
    pub estimated_pack_days: Option<i64>,
    /// Estimated transit days.
    #[serde(default)]
    pub estimated_transit_days: Option<i64>,
}

impl From<ShipmentDatesRequest> for Shipment {
    fn from(req: ShipmentDatesRequest) -> Self {
        Shipment {
            requested_pickup_date: req.requested_pickup_date,
            estimated_pack_days: req.estimated_pack_days,
            estimated_transit_days: req.estimated_transit_days,
        }
    }
}

/// Request body for `/linehaul-rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinehaulRateRequest {
    /// Distance in miles.
    pub distance_miles: i64,
    /// Weight in pounds.
    pub weight_lbs: i64,
    /// Rate type, `ConusLinehaul` when omitted.
    #[serde(default = "default_rate_type")]
    pub rate_type: String,
    /// Date the rate must be effective on.
    pub date: NaiveDate,
}

fn default_rate_type() -> String {
    CONUS_LINEHAUL.to_string()
}
