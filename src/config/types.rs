//! Configuration types for the rate engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the assembled
//! [`TariffConfig`] built from them.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

use crate::calculation::{BusinessCalendar, PeriodClassifier};
use crate::models::{LinehaulRate, PeriodTemplate, Rank};

/// Business calendar configuration from calendar.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Holiday region; only `us_federal` is supported.
    pub region: String,
    /// Closure dates in addition to the federal holidays.
    #[serde(default)]
    pub extra_holidays: Vec<NaiveDate>,
}

/// Period templates from periods.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodsConfig {
    /// Performance period templates.
    pub performance_periods: Vec<PeriodTemplate>,
    /// Rate period templates.
    pub rate_periods: Vec<PeriodTemplate>,
}

/// Weight allowances for one rank, in pounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Entitlement {
    /// Household goods allowance without dependents.
    pub total_weight_self: i64,
    /// Household goods allowance with dependents.
    pub total_weight_self_plus_dependents: i64,
    /// Professional gear allowance of the service member.
    pub pro_gear_weight: i64,
    /// Professional gear allowance of the spouse.
    pub pro_gear_weight_spouse: i64,
}

/// Entitlements configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EntitlementsConfig {
    /// Map of rank to weight allowances.
    pub entitlements: HashMap<Rank, Entitlement>,
}

/// Number of pack days for a weight band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PackDaysBand {
    /// Lowest weight covered, inclusive.
    pub weight_lbs_lower: i64,
    /// First weight not covered.
    pub weight_lbs_upper: i64,
    /// Pack days for shipments in this band.
    pub days: i64,
}

/// Number of transit days for a distance and weight band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TransitDaysBand {
    /// Lowest distance covered, inclusive.
    pub distance_miles_lower: i64,
    /// First distance not covered.
    pub distance_miles_upper: i64,
    /// Lowest weight covered, inclusive.
    pub weight_lbs_lower: i64,
    /// First weight not covered.
    pub weight_lbs_upper: i64,
    /// Transit days for shipments in this band.
    pub days: i64,
}

/// Pack and transit time tables from transit_times.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransitTimes {
    /// Pack days keyed by weight.
    pub pack_days: Vec<PackDaysBand>,
    /// Transit days keyed by distance and weight.
    pub transit_days: Vec<TransitDaysBand>,
}

/// A file of linehaul rate rows under linehaul_rates/.
#[derive(Debug, Clone, Deserialize)]
pub struct LinehaulRatesFile {
    /// The rows.
    pub rates: Vec<LinehaulRate>,
}

/// The complete rate engine configuration loaded from YAML files.
///
/// The tables are validated once while loading and are read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct TariffConfig {
    /// Business day calendar.
    calendar: BusinessCalendar,
    /// Performance and rate period classifier.
    classifier: PeriodClassifier,
    /// Weight entitlements by rank.
    entitlements: HashMap<Rank, Entitlement>,
    /// Pack and transit time tables.
    transit_times: TransitTimes,
    /// Linehaul rate rows, sorted by effective date.
    linehaul_rates: Vec<LinehaulRate>,
}

impl TariffConfig {
    /// Creates a new TariffConfig from its component parts.
    pub fn new(
        calendar: BusinessCalendar,
        classifier: PeriodClassifier,
        entitlements: HashMap<Rank, Entitlement>,
        transit_times: TransitTimes,
        linehaul_rates: Vec<LinehaulRate>,
    ) -> Self {
        let mut sorted_rates = linehaul_rates;
        sorted_rates.sort_by(|a, b| a.effective_date_lower.cmp(&b.effective_date_lower));
        Self {
            calendar,
            classifier,
            entitlements,
            transit_times,
            linehaul_rates: sorted_rates,
        }
    }

    /// Returns the business calendar.
    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    /// Returns the period classifier.
    pub fn classifier(&self) -> &PeriodClassifier {
        &self.classifier
    }

    /// Returns all entitlements.
    pub fn entitlements(&self) -> &HashMap<Rank, Entitlement> {
        &self.entitlements
    }

    /// Returns the pack and transit time tables.
    pub fn transit_times(&self) -> &TransitTimes {
        &self.transit_times
    }

    /// Returns all linehaul rate rows.
    pub fn linehaul_rates(&self) -> &[LinehaulRate] {
        &self.linehaul_rates
    }
}
