//! In-memory rate store over configured rows.

use crate::error::EngineResult;
use crate::models::{Cents, LinehaulRate};

use super::{LinehaulRateFilter, LinehaulRateStore};

/// A rate store holding validated rows in memory.
///
/// Lookups scan every row; tariff tables are small enough that an index
/// would not pay for itself.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateStore {
    rates: Vec<LinehaulRate>,
}

impl InMemoryRateStore {
    /// Creates a store, validating every row.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for the first row with a negative rate or an
    /// empty band.
    pub fn new(rates: Vec<LinehaulRate>) -> EngineResult<Self> {
        for rate in &rates {
            rate.validate()?;
        }
        Ok(Self { rates })
    }

    /// Number of rows in the store.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns `true` if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Adds a row after validating it.
    pub fn insert(&mut self, rate: LinehaulRate) -> EngineResult<()> {
        rate.validate()?;
        self.rates.push(rate);
        Ok(())
    }
}

impl LinehaulRateStore for InMemoryRateStore {
    fn find_rates(&self, filter: &LinehaulRateFilter) -> EngineResult<Vec<Cents>> {
        Ok(self
            .rates
            .iter()
            .filter(|rate| filter.matches(rate))
            .map(|rate| rate.rate_cents)
            .collect())
    }
}
