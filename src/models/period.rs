//! Annual period templates and their resolved, dated form.
//!
//! A [`PeriodTemplate`] is a recurring interval described by two [`Day`]s
//! with no year. Binding it to a target date yields a [`Period`] with
//! concrete start and end dates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A (month, day-of-month) pair with no year.
///
/// Ordering is month-day order, so `Day { month: 1, day: 31 } < Day { month: 2, day: 1 }`.
///
/// # Example
///
/// ```
/// use rate_engine::models::Day;
///
/// let day = Day::new(5, 15).unwrap();
/// assert_eq!(day.to_string(), "05-15");
/// assert!(Day::new(2, 30).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "DayRepr")]
pub struct Day {
    /// Month of the year, 1 through 12.
    pub month: u32,
    /// Day of the month.
    pub day: u32,
}

#[derive(Deserialize)]
struct DayRepr {
    month: u32,
    day: u32,
}

impl TryFrom<DayRepr> for Day {
    type Error = EngineError;

    fn try_from(repr: DayRepr) -> Result<Self, Self::Error> {
        Day::new(repr.month, repr.day)
    }
}

impl Day {
    /// Creates a day, rejecting months outside 1..=12 and days that do not
    /// exist in every year. February 29 is rejected because a template
    /// anchored on it cannot be resolved in common years.
    pub fn new(month: u32, day: u32) -> EngineResult<Self> {
        // 2019 is a common year; any day valid there is valid in every year.
        if NaiveDate::from_ymd_opt(2019, month, day).is_none() {
            return Err(EngineError::InvalidConfig {
                message: format!("{:02}-{:02} is not a day of every year", month, day),
            });
        }
        Ok(Self { month, day })
    }

    /// The month and day of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// Binds this day to a year.
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// A recurring annual interval, inclusive at both ends.
///
/// When `end` is earlier than `start` in month-day order the template wraps
/// the year boundary, e.g. October 1 through May 14.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTemplate {
    /// First day of the interval.
    pub start: Day,
    /// Last day of the interval.
    pub end: Day,
    /// Whether peak season rates apply.
    #[serde(default)]
    pub peak: bool,
}

impl PeriodTemplate {
    /// Returns `true` if the template crosses December 31.
    pub fn wraps(&self) -> bool {
        self.end < self.start
    }

    /// Checks whether the date's month and day fall inside this template.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let day = Day::of(date);
        if self.wraps() {
            day >= self.start || day <= self.end
        } else {
            self.start <= day && day <= self.end
        }
    }

    /// Resolves the template into the concrete period around `date`.
    ///
    /// Non-wrapping templates resolve inside the date's year. For a wrapping
    /// template, a date in the head of the year (at or before `end`) belongs
    /// to the interval that started the previous year; a date in the tail
    /// belongs to the interval that ends the next year.
    pub fn resolve(&self, date: NaiveDate) -> Option<Period> {
        let year = date.year();
        let (start_year, end_year) = if !self.wraps() {
            (year, year)
        } else if Day::of(date) <= self.end {
            (year - 1, year)
        } else {
            (year, year + 1)
        };

        Some(Period {
            start: self.start.in_year(start_year)?,
            end: self.end.in_year(end_year)?,
            peak: self.peak,
        })
    }
}

/// A period bound to concrete dates.
///
/// # Example
///
/// ```
/// use rate_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period {
///     start: NaiveDate::from_ymd_opt(2018, 10, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2019, 5, 14).unwrap(),
///     peak: false,
/// };
/// assert!(period.contains(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// First day of the period (inclusive).
    pub start: NaiveDate,
    /// Last day of the period (inclusive).
    pub end: NaiveDate,
    /// Whether peak season rates apply.
    pub peak: bool,
}

impl Period {
    /// Checks if a date falls within this period, inclusive of both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which family of period templates a lookup used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// Periods governing move scheduling rules.
    Performance,
    /// Periods governing which tariff partition applies.
    Rate,
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodKind::Performance => write!(f, "performance"),
            PeriodKind::Rate => write!(f, "rate"),
        }
    }
}

/// A date together with the performance and rate periods containing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEngineDate {
    /// The classified date.
    pub date: NaiveDate,
    /// The performance period containing `date`.
    pub performance_period: Period,
    /// The rate period containing `date`.
    pub rate_period: Period,
}
