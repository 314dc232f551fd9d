//! Linehaul rate lookup.
//!
//! This module finds the single tariff row covering a shipment and, when
//! nothing matches, works out which query dimension excluded every row.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{Cents, RateDimension};
use crate::store::{LinehaulRateFilter, LinehaulRateStore};

/// Looks up the base linehaul rate for a shipment.
///
/// Exactly one row must have `distance_miles` and `weight_lbs` inside its
/// bands, the given `rate_type`, and be effective on `date`.
///
/// # Errors
///
/// - `RateNotFound` when no row matches. Distance, weight, type and date
///   are each queried alone, in that order, and the first dimension with no
///   candidate rows is named with the queried value. When every dimension
///   alone has candidates the error names the combination.
/// - `AmbiguousRate` when more than one row matches.
/// - `Storage` when the store fails.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::fetch_base_linehaul_rate;
/// use rate_engine::models::{Cents, LinehaulRate, CONUS_LINEHAUL};
/// use rate_engine::store::InMemoryRateStore;
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let store = InMemoryRateStore::new(vec![LinehaulRate {
///     distance_miles_lower: 1000,
///     distance_miles_upper: 2000,
///     weight_lbs_lower: 4000,
///     weight_lbs_upper: 8000,
///     rate_type: CONUS_LINEHAUL.to_string(),
///     effective_date_lower: date(2018, 5, 15),
///     effective_date_upper: date(2019, 5, 15),
///     rate_cents: Cents(512300),
/// }])
/// .unwrap();
///
/// let rate =
///     fetch_base_linehaul_rate(&store, 1500, 4000, CONUS_LINEHAUL, date(2018, 6, 1)).unwrap();
/// assert_eq!(rate, Cents(512300));
/// ```
pub fn fetch_base_linehaul_rate<S>(
    store: &S,
    distance_miles: i64,
    weight_lbs: i64,
    rate_type: &str,
    date: NaiveDate,
) -> EngineResult<Cents>
where
    S: LinehaulRateStore + ?Sized,
{
    let rates = store.find_rates(&LinehaulRateFilter::exact(
        distance_miles,
        weight_lbs,
        rate_type,
        date,
    ))?;

    match rates.as_slice() {
        [rate] => Ok(*rate),
        [] => Err(diagnose_missing_rate(store, distance_miles, weight_lbs, rate_type, date)?),
        _ => Err(EngineError::AmbiguousRate {
            count: rates.len(),
            distance_miles,
            weight_lbs,
            rate_type: rate_type.to_string(),
            date,
        }),
    }
}

/// Builds the `RateNotFound` error for a query that matched no row.
fn diagnose_missing_rate<S>(
    store: &S,
    distance_miles: i64,
    weight_lbs: i64,
    rate_type: &str,
    date: NaiveDate,
) -> EngineResult<EngineError>
where
    S: LinehaulRateStore + ?Sized,
{
    let diagnostics = [
        (
            RateDimension::Distance,
            LinehaulRateFilter::by_distance(distance_miles),
            distance_miles.to_string(),
        ),
        (
            RateDimension::Weight,
            LinehaulRateFilter::by_weight(weight_lbs),
            weight_lbs.to_string(),
        ),
        (
            RateDimension::Type,
            LinehaulRateFilter::by_type(rate_type),
            rate_type.to_string(),
        ),
        (
            RateDimension::Date,
            LinehaulRateFilter::by_date(date),
            date.to_string(),
        ),
    ];

    for (dimension, filter, value) in diagnostics {
        if store.find_rates(&filter)?.is_empty() {
            return Ok(EngineError::RateNotFound { dimension, value });
        }
    }

    Ok(EngineError::RateNotFound {
        dimension: RateDimension::Combination,
        value: format!(
            "distance {}, weight {}, type {}, date {}",
            distance_miles, weight_lbs, rate_type, date
        ),
    })
}
