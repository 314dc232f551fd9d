//! Core data models for the rate engine.
//!
//! This module contains the domain models used throughout the engine.

mod address;
mod move_dates;
mod orders;
mod period;
mod tariff;

pub use address::{Address, AddressRole, LatLong};
pub use move_dates::MoveDatesSummary;
pub use orders::{Orders, Rank, Shipment};
pub use period::{Day, Period, PeriodKind, PeriodTemplate, RateEngineDate};
pub use tariff::{CONUS_LINEHAUL, Cents, LinehaulRate, RateDimension};
