//! Tariff 400NG linehaul rate rows and money types.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Rate type of domestic (continental US) linehaul rows.
pub const CONUS_LINEHAUL: &str = "ConusLinehaul";

/// An amount of money in whole cents.
///
/// # Example
///
/// ```
/// use rate_engine::models::Cents;
///
/// assert_eq!(Cents(123456).to_dollar_string(), "$1234.56");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    /// The amount in dollars.
    pub fn to_dollars(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// The amount formatted as `$D.CC`.
    pub fn to_dollar_string(self) -> String {
        format!("${}", self.to_dollars())
    }
}

impl std::fmt::Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the linehaul rate table.
///
/// Each banded dimension is a half-open interval: the lower bound is
/// inclusive, the upper bound exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinehaulRate {
    /// Lowest distance in miles covered by this row.
    pub distance_miles_lower: i64,
    /// First distance in miles no longer covered.
    pub distance_miles_upper: i64,
    /// Lowest weight in pounds covered by this row.
    pub weight_lbs_lower: i64,
    /// First weight in pounds no longer covered.
    pub weight_lbs_upper: i64,
    /// Rate type, e.g. `ConusLinehaul`.
    #[serde(rename = "type")]
    pub rate_type: String,
    /// First day the rate is effective.
    pub effective_date_lower: NaiveDate,
    /// First day the rate is no longer effective.
    pub effective_date_upper: NaiveDate,
    /// The rate.
    pub rate_cents: Cents,
}

/// Last year an effective date may fall in.
const MAX_EFFECTIVE_YEAR: i32 = 9999;

impl LinehaulRate {
    /// Checks the row invariants enforced on every write.
    ///
    /// Effective dates must fall in years 0 through 9999 so that their
    /// ISO text form orders the same way as the dates.
    pub fn validate(&self) -> EngineResult<()> {
        if self.rate_cents.0 < 0 {
            return Err(EngineError::invalid_input(
                "rate_cents",
                format!("must not be negative, got {}", self.rate_cents),
            ));
        }
        if self.distance_miles_lower >= self.distance_miles_upper {
            return Err(EngineError::invalid_input(
                "distance_miles_lower",
                format!(
                    "{} must be less than distance_miles_upper {}",
                    self.distance_miles_lower, self.distance_miles_upper
                ),
            ));
        }
        if self.weight_lbs_lower >= self.weight_lbs_upper {
            return Err(EngineError::invalid_input(
                "weight_lbs_lower",
                format!(
                    "{} must be less than weight_lbs_upper {}",
                    self.weight_lbs_lower, self.weight_lbs_upper
                ),
            ));
        }
        if self.effective_date_lower >= self.effective_date_upper {
            return Err(EngineError::invalid_input(
                "effective_date_lower",
                format!(
                    "{} must be before effective_date_upper {}",
                    self.effective_date_lower, self.effective_date_upper
                ),
            ));
        }
        for (field, date) in [
            ("effective_date_lower", self.effective_date_lower),
            ("effective_date_upper", self.effective_date_upper),
        ] {
            if !(0..=MAX_EFFECTIVE_YEAR).contains(&date.year()) {
                return Err(EngineError::invalid_input(
                    field,
                    format!("year must be between 0 and {}, got {}", MAX_EFFECTIVE_YEAR, date),
                ));
            }
        }
        Ok(())
    }

    /// Returns `true` if the distance falls in this row's band.
    pub fn covers_distance(&self, distance_miles: i64) -> bool {
        self.distance_miles_lower <= distance_miles && distance_miles < self.distance_miles_upper
    }

    /// Returns `true` if the weight falls in this row's band.
    pub fn covers_weight(&self, weight_lbs: i64) -> bool {
        self.weight_lbs_lower <= weight_lbs && weight_lbs < self.weight_lbs_upper
    }

    /// Returns `true` if the row is effective on the date.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.effective_date_lower <= date && date < self.effective_date_upper
    }
}

/// A dimension of the banded rate query, used to explain an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateDimension {
    /// No row covers the distance.
    Distance,
    /// No row covers the weight.
    Weight,
    /// No row has the rate type.
    Type,
    /// No row is effective on the date.
    Date,
    /// Every dimension has candidates on its own but no row covers them all.
    Combination,
}

impl std::fmt::Display for RateDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateDimension::Distance => write!(f, "distance"),
            RateDimension::Weight => write!(f, "weight"),
            RateDimension::Type => write!(f, "type"),
            RateDimension::Date => write!(f, "date"),
            RateDimension::Combination => write!(f, "combination"),
        }
    }
}
