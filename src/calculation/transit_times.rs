//! Pack and transit day counts.
//!
//! Both counts come from banded tables in transit_times.yaml. Bands are
//! half-open: the lower bound is included, the upper bound is not.

use crate::config::TransitTimes;
use crate::error::{EngineError, EngineResult};

/// Number of business days needed to pack a shipment of `weight_lbs`.
///
/// # Errors
///
/// Returns `InvalidInput` on field `weight_lbs` when no band covers the
/// weight.
pub fn pack_days(tables: &TransitTimes, weight_lbs: i64) -> EngineResult<i64> {
    tables
        .pack_days
        .iter()
        .find(|band| band.weight_lbs_lower <= weight_lbs && weight_lbs < band.weight_lbs_upper)
        .map(|band| band.days)
        .ok_or_else(|| {
            EngineError::invalid_input(
                "weight_lbs",
                format!("no pack days band covers {}", weight_lbs),
            )
        })
}

/// Number of calendar days a shipment of `weight_lbs` spends in transit
/// over `distance_miles`.
///
/// # Errors
///
/// Returns `InvalidInput` on field `distance_miles` when no band covers the
/// distance and weight.
pub fn transit_days(
    tables: &TransitTimes,
    distance_miles: i64,
    weight_lbs: i64,
) -> EngineResult<i64> {
    tables
        .transit_days
        .iter()
        .find(|band| {
            band.distance_miles_lower <= distance_miles
                && distance_miles < band.distance_miles_upper
                && band.weight_lbs_lower <= weight_lbs
                && weight_lbs < band.weight_lbs_upper
        })
        .map(|band| band.days)
        .ok_or_else(|| {
            EngineError::invalid_input(
                "distance_miles",
                format!(
                    "no transit days band covers {} miles at {} lbs",
                    distance_miles, weight_lbs
                ),
            )
        })
}
