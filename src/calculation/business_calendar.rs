//! Business day classification and move date stepping.
//!
//! This module provides the US federal business calendar used to place
//! pack, pickup and delivery days, and the calendar-day stepping used for
//! transit days. Business-day stepping and calendar-day stepping are kept as
//! separate operations: trucks move every day, crews only work business days.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};

/// Largest number of days a single stepping call will produce.
pub const MAX_DAY_COUNT: i64 = 365;

/// A business calendar over US federal holidays.
///
/// Saturdays, Sundays and observed federal holidays are not business days.
/// Fixed-date holidays that fall on a Saturday are observed the Friday
/// before, those on a Sunday the Monday after. Additional closure dates can
/// be supplied from configuration.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::BusinessCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = BusinessCalendar::us_federal();
///
/// // 2018-07-04 is Independence Day (Wednesday)
/// assert!(!calendar.is_business_day(NaiveDate::from_ymd_opt(2018, 7, 4).unwrap()));
/// // 2018-07-05 is an ordinary Thursday
/// assert!(calendar.is_business_day(NaiveDate::from_ymd_opt(2018, 7, 5).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessCalendar {
    extra_holidays: BTreeSet<NaiveDate>,
}

impl BusinessCalendar {
    /// Creates the US federal calendar with no extra closures.
    pub fn us_federal() -> Self {
        Self::default()
    }

    /// Adds closure dates on top of the federal holidays.
    pub fn with_extra_holidays<I>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.extra_holidays.extend(dates);
        self
    }

    /// Returns the name of the holiday observed on `date`, if any.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&'static str> {
        if self.extra_holidays.contains(&date) {
            return Some("Closure");
        }
        // A Saturday New Year's Day is observed on December 31 of the year before.
        [date.year(), date.year() + 1]
            .into_iter()
            .flat_map(us_federal_holidays)
            .find(|(observed, _)| *observed == date)
            .map(|(_, name)| name)
    }

    /// Returns `true` if `date` is an observed holiday or extra closure.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }

    /// Returns `true` if `date` is neither a weekend day nor a holiday.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.is_holiday(date)
    }

    /// The first `count` business days on or after `start`, ascending.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `count` is negative or above [`MAX_DAY_COUNT`].
    ///
    /// # Example
    ///
    /// ```
    /// use rate_engine::calculation::BusinessCalendar;
    /// use chrono::NaiveDate;
    ///
    /// let calendar = BusinessCalendar::us_federal();
    /// // Friday 2018-08-31, then Labor Day Monday 2018-09-03 is skipped.
    /// let days = calendar
    ///     .business_days_forward(NaiveDate::from_ymd_opt(2018, 8, 31).unwrap(), 2)
    ///     .unwrap();
    /// assert_eq!(days, vec![
    ///     NaiveDate::from_ymd_opt(2018, 8, 31).unwrap(),
    ///     NaiveDate::from_ymd_opt(2018, 9, 4).unwrap(),
    /// ]);
    /// ```
    pub fn business_days_forward(
        &self,
        start: NaiveDate,
        count: i64,
    ) -> EngineResult<Vec<NaiveDate>> {
        let count = checked_count(count)?;
        let mut dates = Vec::with_capacity(count);
        let mut current = start;
        while dates.len() < count {
            if self.is_business_day(current) {
                dates.push(current);
            }
            current = step(current, 1)?;
        }
        Ok(dates)
    }

    /// The `count` business days on or before `start`, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `count` is negative or above [`MAX_DAY_COUNT`].
    pub fn business_days_backward(
        &self,
        start: NaiveDate,
        count: i64,
    ) -> EngineResult<Vec<NaiveDate>> {
        let count = checked_count(count)?;
        let mut dates = Vec::with_capacity(count);
        let mut current = start;
        while dates.len() < count {
            if self.is_business_day(current) {
                dates.push(current);
            }
            current = step(current, -1)?;
        }
        dates.reverse();
        Ok(dates)
    }

    /// `count` consecutive calendar days starting at `start`.
    ///
    /// Weekends and holidays are included.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `count` is negative or above [`MAX_DAY_COUNT`].
    pub fn calendar_days_forward(
        &self,
        start: NaiveDate,
        count: i64,
    ) -> EngineResult<Vec<NaiveDate>> {
        let count = checked_count(count)?;
        let mut dates = Vec::with_capacity(count);
        let mut current = start;
        for _ in 0..count {
            dates.push(current);
            current = step(current, 1)?;
        }
        Ok(dates)
    }
}

/// The observed US federal holidays of `year`.
///
/// The observed date of a fixed holiday may fall in the previous year
/// (New Year's Day on a Saturday).
pub fn us_federal_holidays(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let mut holidays = Vec::with_capacity(11);

    let mut fixed = |month: u32, day: u32, name: &'static str| {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            holidays.push((observed(date), name));
        }
    };
    fixed(1, 1, "New Year's Day");
    if year >= 2021 {
        fixed(6, 19, "Juneteenth National Independence Day");
    }
    fixed(7, 4, "Independence Day");
    fixed(11, 11, "Veterans Day");
    fixed(12, 25, "Christmas Day");

    let floating = [
        (1, Weekday::Mon, Some(3), "Martin Luther King Jr. Day"),
        (2, Weekday::Mon, Some(3), "Washington's Birthday"),
        (5, Weekday::Mon, None, "Memorial Day"),
        (9, Weekday::Mon, Some(1), "Labor Day"),
        (10, Weekday::Mon, Some(2), "Columbus Day"),
        (11, Weekday::Thu, Some(4), "Thanksgiving Day"),
    ];
    for (month, weekday, nth, name) in floating {
        let date = match nth {
            Some(n) => NaiveDate::from_weekday_of_month_opt(year, month, weekday, n),
            None => last_weekday_of_month(year, month, weekday),
        };
        if let Some(date) = date {
            holidays.push((date, name));
        }
    }

    holidays
}

/// Shifts a Saturday holiday to Friday and a Sunday holiday to Monday.
fn observed(date: NaiveDate) -> NaiveDate {
    let shifted = match date.weekday() {
        Weekday::Sat => date.checked_sub_days(Days::new(1)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => None,
    };
    shifted.unwrap_or(date)
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, 5)
        .or_else(|| NaiveDate::from_weekday_of_month_opt(year, month, weekday, 4))
}

fn checked_count(count: i64) -> EngineResult<usize> {
    if count > MAX_DAY_COUNT {
        return Err(EngineError::invalid_input(
            "count",
            format!("must not exceed {}, got {}", MAX_DAY_COUNT, count),
        ));
    }
    usize::try_from(count).map_err(|_| {
        EngineError::invalid_input("count", format!("must not be negative, got {}", count))
    })
}

fn step(date: NaiveDate, days: i64) -> EngineResult<NaiveDate> {
    let next = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    next.ok_or_else(|| {
        EngineError::invalid_input("date", format!("stepping from {} leaves the calendar", date))
    })
}
