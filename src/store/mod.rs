//! Tariff rate storage.
//!
//! The linehaul lookup only needs one query: every rate row whose bands
//! contain a set of optional query values. [`LinehaulRateStore`] is that
//! query, with an in-memory implementation over the configured rows and a
//! SQLite implementation behind the `sqlite` feature.

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{Cents, LinehaulRate};

pub use memory::InMemoryRateStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRateStore;

/// A banded query over linehaul rate rows.
///
/// Each `Some` field restricts the result to rows whose band contains the
/// value (or whose type equals it); `None` leaves the dimension open. The
/// full lookup sets all four, the diagnostic queries set exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinehaulRateFilter {
    /// Distance in miles.
    pub distance_miles: Option<i64>,
    /// Weight in pounds.
    pub weight_lbs: Option<i64>,
    /// Rate type, compared exactly.
    pub rate_type: Option<String>,
    /// Date the rate must be effective on.
    pub date: Option<NaiveDate>,
}

impl LinehaulRateFilter {
    /// Restricts every dimension.
    pub fn exact(distance_miles: i64, weight_lbs: i64, rate_type: &str, date: NaiveDate) -> Self {
        Self {
            distance_miles: Some(distance_miles),
            weight_lbs: Some(weight_lbs),
            rate_type: Some(rate_type.to_string()),
            date: Some(date),
        }
    }

    /// Restricts distance only.
    pub fn by_distance(distance_miles: i64) -> Self {
        Self {
            distance_miles: Some(distance_miles),
            ..Self::default()
        }
    }

    /// Restricts weight only.
    pub fn by_weight(weight_lbs: i64) -> Self {
        Self {
            weight_lbs: Some(weight_lbs),
            ..Self::default()
        }
    }

    /// Restricts rate type only.
    pub fn by_type(rate_type: &str) -> Self {
        Self {
            rate_type: Some(rate_type.to_string()),
            ..Self::default()
        }
    }

    /// Restricts effective date only.
    pub fn by_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Returns `true` if `rate` satisfies every restricted dimension.
    pub fn matches(&self, rate: &LinehaulRate) -> bool {
        self.distance_miles.is_none_or(|d| rate.covers_distance(d))
            && self.weight_lbs.is_none_or(|w| rate.covers_weight(w))
            && self.rate_type.as_deref().is_none_or(|t| rate.rate_type == t)
            && self.date.is_none_or(|d| rate.covers_date(d))
    }
}

/// Read access to the linehaul rate table.
///
/// Implementations return the `rate_cents` of every matching row. Failures
/// of the backing store are reported as `Storage` errors.
pub trait LinehaulRateStore: Send + Sync {
    /// Returns the rates of all rows matching `filter`.
    fn find_rates(&self, filter: &LinehaulRateFilter) -> EngineResult<Vec<Cents>>;
}
