//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the rate
//! engine tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::{BusinessCalendar, PeriodClassifier};
use crate::error::{EngineError, EngineResult};
use crate::models::{LinehaulRate, Rank};

use super::types::{
    CalendarConfig, Entitlement, EntitlementsConfig, LinehaulRatesFile, PeriodsConfig,
    TariffConfig, TransitTimes,
};

/// The only holiday region the business calendar implements.
const US_FEDERAL_REGION: &str = "us_federal";

/// Loads and provides access to the rate engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every table, and builds the calendar and period classifier
/// that the rest of the engine is given.
///
/// # Directory Structure
///
/// ```text
/// config/tariff400ng/
/// ├── calendar.yaml        # Holiday region and extra closures
/// ├── periods.yaml         # Performance and rate period templates
/// ├── entitlements.yaml    # Weight allowances by rank
/// ├── transit_times.yaml   # Pack and transit day bands
/// └── linehaul_rates/
///     └── 2018-05-15.yaml  # Linehaul rate rows
/// ```
///
/// # Example
///
/// ```no_run
/// use rate_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/tariff400ng").unwrap();
///
/// let red = loader
///     .classifier()
///     .rate_engine_date(NaiveDate::from_ymd_opt(2018, 6, 1).unwrap())
///     .unwrap();
/// println!("Peak season: {}", red.rate_period.peak);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TariffConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - A table violates its invariants (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let calendar_config = Self::load_yaml::<CalendarConfig>(&path.join("calendar.yaml"))?;
        let calendar = Self::build_calendar(calendar_config)?;

        let periods = Self::load_yaml::<PeriodsConfig>(&path.join("periods.yaml"))?;
        let classifier = PeriodClassifier::new(periods.performance_periods, periods.rate_periods)?;

        let entitlements =
            Self::load_yaml::<EntitlementsConfig>(&path.join("entitlements.yaml"))?;

        let transit_times = Self::load_yaml::<TransitTimes>(&path.join("transit_times.yaml"))?;
        Self::validate_transit_times(&transit_times)?;

        let linehaul_rates = Self::load_linehaul_rates(&path.join("linehaul_rates"))?;

        debug!(
            path = %path.display(),
            ranks = entitlements.entitlements.len(),
            linehaul_rates = linehaul_rates.len(),
            "Loaded tariff configuration"
        );

        let config = TariffConfig::new(
            calendar,
            classifier,
            entitlements.entitlements,
            transit_times,
            linehaul_rates,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn build_calendar(config: CalendarConfig) -> EngineResult<BusinessCalendar> {
        if config.region != US_FEDERAL_REGION {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "unsupported holiday region '{}', expected '{}'",
                    config.region, US_FEDERAL_REGION
                ),
            });
        }
        Ok(BusinessCalendar::us_federal().with_extra_holidays(config.extra_holidays))
    }

    fn validate_transit_times(tables: &TransitTimes) -> EngineResult<()> {
        let pack_bands = tables
            .pack_days
            .iter()
            .map(|b| (b.weight_lbs_lower, b.weight_lbs_upper, b.days));
        let transit_bands = tables.transit_days.iter().flat_map(|b| {
            [
                (b.distance_miles_lower, b.distance_miles_upper, b.days),
                (b.weight_lbs_lower, b.weight_lbs_upper, b.days),
            ]
        });

        for (lower, upper, days) in pack_bands.chain(transit_bands) {
            if lower >= upper {
                return Err(EngineError::InvalidConfig {
                    message: format!("transit time band [{}, {}) is empty", lower, upper),
                });
            }
            if days < 0 {
                return Err(EngineError::InvalidConfig {
                    message: format!("transit time band [{}, {}) has {} days", lower, upper, days),
                });
            }
        }
        Ok(())
    }

    /// Loads all rate files from the linehaul_rates directory.
    fn load_linehaul_rates(rates_dir: &Path) -> EngineResult<Vec<LinehaulRate>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut rates = Vec::new();
        for path in &paths {
            let file = Self::load_yaml::<LinehaulRatesFile>(path)?;
            for (index, rate) in file.rates.into_iter().enumerate() {
                rate.validate().map_err(|e| EngineError::InvalidConfig {
                    message: format!("{} row {}: {}", path.display(), index, e),
                })?;
                rates.push(rate);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &TariffConfig {
        &self.config
    }

    /// Returns the business calendar.
    pub fn calendar(&self) -> &BusinessCalendar {
        self.config.calendar()
    }

    /// Returns the period classifier.
    pub fn classifier(&self) -> &PeriodClassifier {
        self.config.classifier()
    }

    /// Returns the pack and transit time tables.
    pub fn transit_times(&self) -> &TransitTimes {
        self.config.transit_times()
    }

    /// Gets the weight allowances for a rank.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the rank has no entry in entitlements.yaml.
    pub fn get_entitlement(&self, rank: Rank) -> EngineResult<&Entitlement> {
        self.config
            .entitlements()
            .get(&rank)
            .ok_or_else(|| EngineError::InvalidConfig {
                message: format!("no entitlement configured for rank {:?}", rank),
            })
    }
}
