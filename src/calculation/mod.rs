//! Calculation logic for the rate engine.
//!
//! This module contains the date and rate computations: business day
//! classification and stepping, performance and rate period classification,
//! entitlement weights, pack and transit day lookups, move date scheduling,
//! and the banded linehaul rate lookup with its diagnostics.

mod business_calendar;
mod entitlements;
mod linehaul_rate;
mod move_dates;
mod period_classifier;
mod transit_times;

pub use business_calendar::{BusinessCalendar, MAX_DAY_COUNT, us_federal_holidays};
pub use entitlements::entitlement_weight;
pub use linehaul_rate::fetch_base_linehaul_rate;
pub use move_dates::{calculate_move_dates, compute_move_dates, compute_move_dates_from_shipment};
pub use period_classifier::PeriodClassifier;
pub use transit_times::{pack_days, transit_days};
