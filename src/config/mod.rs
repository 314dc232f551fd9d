//! Configuration loading and management for the rate engine.
//!
//! This module loads the static tables of the engine from YAML files:
//! the business calendar, the period templates, weight entitlements,
//! pack/transit time bands and linehaul rate rows. Everything is loaded
//! and validated once at startup and injected into the calculations.
//!
//! # Example
//!
//! ```no_run
//! use rate_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/tariff400ng").unwrap();
//! println!("Loaded {} linehaul rates", config.config().linehaul_rates().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalendarConfig, Entitlement, EntitlementsConfig, LinehaulRatesFile, PackDaysBand,
    PeriodsConfig, TariffConfig, TransitDaysBand, TransitTimes,
};
