//! Performance and rate period classification.
//!
//! The classifier owns the annual period templates loaded from
//! configuration and maps a calendar date to the concrete periods that
//! contain it.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{Day, Period, PeriodKind, PeriodTemplate, RateEngineDate};

/// Classifies dates into performance and rate periods.
///
/// Construction verifies that each template list covers every day of the
/// year exactly once, so lookups on a constructed classifier always match.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::PeriodClassifier;
/// use chrono::NaiveDate;
///
/// let classifier = PeriodClassifier::tariff_400ng();
/// let red = classifier
///     .rate_engine_date(NaiveDate::from_ymd_opt(2018, 11, 1).unwrap())
///     .unwrap();
///
/// assert_eq!(red.rate_period.start, NaiveDate::from_ymd_opt(2018, 10, 1).unwrap());
/// assert_eq!(red.rate_period.end, NaiveDate::from_ymd_opt(2019, 5, 14).unwrap());
/// assert!(!red.rate_period.peak);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodClassifier {
    performance_periods: Vec<PeriodTemplate>,
    rate_periods: Vec<PeriodTemplate>,
}

impl PeriodClassifier {
    /// Creates a classifier from performance and rate templates.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either list leaves a day of the year
    /// uncovered or covers a day more than once.
    pub fn new(
        performance_periods: Vec<PeriodTemplate>,
        rate_periods: Vec<PeriodTemplate>,
    ) -> EngineResult<Self> {
        check_exhaustive(PeriodKind::Performance, &performance_periods)?;
        check_exhaustive(PeriodKind::Rate, &rate_periods)?;
        Ok(Self {
            performance_periods,
            rate_periods,
        })
    }

    /// The 400NG tariff season boundaries.
    pub fn tariff_400ng() -> Self {
        Self {
            performance_periods: vec![
                template(5, 15, 7, 31, true),
                template(8, 1, 9, 30, true),
                template(10, 1, 12, 31, false),
                template(1, 1, 3, 6, false),
                template(3, 7, 5, 14, false),
            ],
            rate_periods: vec![template(5, 15, 9, 30, true), template(10, 1, 5, 14, false)],
        }
    }

    /// The performance templates, in configuration order.
    pub fn performance_periods(&self) -> &[PeriodTemplate] {
        &self.performance_periods
    }

    /// The rate templates, in configuration order.
    pub fn rate_periods(&self) -> &[PeriodTemplate] {
        &self.rate_periods
    }

    /// The performance period containing `date`.
    pub fn performance_period_containing(&self, date: NaiveDate) -> Option<Period> {
        containing(&self.performance_periods, date)
    }

    /// The rate period containing `date`.
    pub fn rate_period_containing(&self, date: NaiveDate) -> Option<Period> {
        containing(&self.rate_periods, date)
    }

    /// Classifies `date` into both period families.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` when a template list has no match, which
    /// indicates a defect in the period table rather than a business answer.
    pub fn rate_engine_date(&self, date: NaiveDate) -> EngineResult<RateEngineDate> {
        let performance_period = self.performance_period_containing(date).ok_or(
            EngineError::PeriodNotFound {
                kind: PeriodKind::Performance,
                date,
            },
        )?;
        let rate_period = self
            .rate_period_containing(date)
            .ok_or(EngineError::PeriodNotFound {
                kind: PeriodKind::Rate,
                date,
            })?;

        Ok(RateEngineDate {
            date,
            performance_period,
            rate_period,
        })
    }
}

fn containing(templates: &[PeriodTemplate], date: NaiveDate) -> Option<Period> {
    templates
        .iter()
        .find(|t| t.contains(date))
        .and_then(|t| t.resolve(date))
}

/// Walks a leap year and requires exactly one matching template per day.
fn check_exhaustive(kind: PeriodKind, templates: &[PeriodTemplate]) -> EngineResult<()> {
    let first = NaiveDate::from_ymd_opt(2020, 1, 1).ok_or_else(|| EngineError::InvalidConfig {
        message: "cannot build reference year".to_string(),
    })?;

    for date in first.iter_days().take(366) {
        let matches = templates.iter().filter(|t| t.contains(date)).count();
        if matches != 1 {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "{} periods must cover {} exactly once, found {} matches",
                    kind,
                    date.format("%m-%d"),
                    matches
                ),
            });
        }
    }
    Ok(())
}

fn template(
    start_month: u32,
    start_day: u32,
    end_month: u32,
    end_day: u32,
    peak: bool,
) -> PeriodTemplate {
    PeriodTemplate {
        start: Day {
            month: start_month,
            day: start_day,
        },
        end: Day {
            month: end_month,
            day: end_day,
        },
        peak,
    }
}
