//! Application state for the rate engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::store::{InMemoryRateStore, LinehaulRateStore};

/// Shared application state.
///
/// Holds the loaded tariff configuration and the rate store. Both are
/// read-only and shared behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The loaded tariff configuration.
    config: Arc<ConfigLoader>,
    /// Source of linehaul rate rows.
    rates: Arc<dyn LinehaulRateStore>,
}

impl AppState {
    /// Creates a state that serves linehaul rates from the configured rows.
    pub fn new(config: ConfigLoader) -> EngineResult<Self> {
        let rates = InMemoryRateStore::new(config.config().linehaul_rates().to_vec())?;
        Ok(Self::with_rate_store(config, Arc::new(rates)))
    }

    /// Creates a state with an explicit rate store.
    pub fn with_rate_store(config: ConfigLoader, rates: Arc<dyn LinehaulRateStore>) -> Self {
        Self {
            config: Arc::new(config),
            rates,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the rate store.
    pub fn rates(&self) -> &dyn LinehaulRateStore {
        self.rates.as_ref()
    }
}
