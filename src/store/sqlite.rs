//! SQLite rate store (feature `sqlite`).
//!
//! Keeps linehaul rate rows in a single `linehaul_rates` table. Rows are
//! validated before insert, and the banded lookup is one parameterized
//! query in which an unset filter dimension is passed as NULL.
//!
//! Effective dates are stored as ISO text and compared as text. That order
//! matches date order only for four-digit years, which
//! [`LinehaulRate::validate`] enforces on every insert.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, params};

use crate::error::{EngineError, EngineResult};
use crate::models::{Cents, LinehaulRate};

use super::{LinehaulRateFilter, LinehaulRateStore};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS linehaul_rates (
     id                   INTEGER PRIMARY KEY,
     distance_miles_lower INTEGER NOT NULL,
     distance_miles_upper INTEGER NOT NULL,
     weight_lbs_lower     INTEGER NOT NULL,
     weight_lbs_upper     INTEGER NOT NULL,
     type                 TEXT    NOT NULL,
     effective_date_lower TEXT    NOT NULL,
     effective_date_upper TEXT    NOT NULL,
     rate_cents           INTEGER NOT NULL
 );";

const FIND_RATES: &str = "SELECT rate_cents FROM linehaul_rates \
     WHERE (?1 IS NULL OR (distance_miles_lower <= ?1 AND ?1 < distance_miles_upper)) \
       AND (?2 IS NULL OR (weight_lbs_lower <= ?2 AND ?2 < weight_lbs_upper)) \
       AND (?3 IS NULL OR type = ?3) \
       AND (?4 IS NULL OR (effective_date_lower <= ?4 AND ?4 < effective_date_upper)) \
     ORDER BY id";

/// A rate store backed by an SQLite database.
///
/// The connection is shared behind a mutex, so one store can serve
/// concurrent requests.
pub struct SqliteRateStore {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteRateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRateStore").finish_non_exhaustive()
    }
}

impl SqliteRateStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Create a private in-memory database.
    pub fn open_in_memory() -> EngineResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> EngineResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| EngineError::Storage {
            message: "rate store connection lock poisoned".to_string(),
        })
    }

    /// Inserts one row after validating it.
    pub fn insert(&self, rate: &LinehaulRate) -> EngineResult<()> {
        self.insert_all(std::slice::from_ref(rate))
    }

    /// Inserts rows in a single transaction. Nothing is written if any row
    /// fails validation.
    pub fn insert_all(&self, rates: &[LinehaulRate]) -> EngineResult<()> {
        for rate in rates {
            rate.validate()?;
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO linehaul_rates \
                 (distance_miles_lower, distance_miles_upper, weight_lbs_lower, weight_lbs_upper, \
                  type, effective_date_lower, effective_date_upper, rate_cents) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for rate in rates {
                stmt.execute(params![
                    rate.distance_miles_lower,
                    rate.distance_miles_upper,
                    rate.weight_lbs_lower,
                    rate.weight_lbs_upper,
                    rate.rate_type,
                    rate.effective_date_lower,
                    rate.effective_date_upper,
                    rate.rate_cents.0,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Number of rows in the table.
    pub fn count(&self) -> EngineResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM linehaul_rates", [], |row| {
            row.get(0)
        })?;
        usize::try_from(count).map_err(|_| EngineError::Storage {
            message: format!("invalid row count {}", count),
        })
    }
}

impl LinehaulRateStore for SqliteRateStore {
    fn find_rates(&self, filter: &LinehaulRateFilter) -> EngineResult<Vec<Cents>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(FIND_RATES)?;
        let rows = stmt.query_map(
            params![
                filter.distance_miles,
                filter.weight_lbs,
                filter.rate_type,
                filter.date,
            ],
            |row| row.get::<_, i64>(0),
        )?;

        let mut rates = Vec::new();
        for cents in rows {
            rates.push(Cents(cents?));
        }
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rate(distance_lower: i64, distance_upper: i64, cents: i64) -> LinehaulRate {
        LinehaulRate {
            distance_miles_lower: distance_lower,
            distance_miles_upper: distance_upper,
            weight_lbs_lower: 4000,
            weight_lbs_upper: 8000,
            rate_type: "ConusLinehaul".to_string(),
            effective_date_lower: date(2018, 5, 15),
            effective_date_upper: date(2019, 5, 15),
            rate_cents: Cents(cents),
        }
    }

    fn seeded() -> SqliteRateStore {
        let store = SqliteRateStore::open_in_memory().unwrap();
        store
            .insert_all(&[rate(0, 1000, 300000), rate(1000, 2000, 512300)])
            .unwrap();
        store
    }

    #[test]
    fn test_exact_lookup() {
        let store = seeded();
        let filter = LinehaulRateFilter::exact(1500, 4000, "ConusLinehaul", date(2018, 6, 1));
        assert_eq!(store.find_rates(&filter).unwrap(), vec![Cents(512300)]);
    }

    #[test]
    fn test_bands_are_half_open() {
        let store = seeded();
        assert_eq!(
            store.find_rates(&LinehaulRateFilter::by_distance(1000)).unwrap(),
            vec![Cents(512300)]
        );
        assert!(store.find_rates(&LinehaulRateFilter::by_weight(8000)).unwrap().is_empty());
        assert!(
            store
                .find_rates(&LinehaulRateFilter::by_date(date(2019, 5, 15)))
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            store
                .find_rates(&LinehaulRateFilter::by_date(date(2018, 5, 15)))
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_type_filter() {
        let store = seeded();
        let conus = store
            .find_rates(&LinehaulRateFilter::by_type("ConusLinehaul"))
            .unwrap();
        assert_eq!(conus.len(), 2);
        assert!(
            store
                .find_rates(&LinehaulRateFilter::by_type("Shorthaul"))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_invalid_row_rejected_without_partial_write() {
        let store = SqliteRateStore::open_in_memory().unwrap();
        let result = store.insert_all(&[rate(0, 1000, 1), rate(1000, 1000, 2)]);

        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_five_digit_year_rejected_on_insert() {
        let store = SqliteRateStore::open_in_memory().unwrap();
        let mut far = rate(0, 1000, 1);
        far.effective_date_upper = date(10000, 1, 1);

        let result = store.insert(&far);

        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { field, .. }) if field == "effective_date_upper"
        ));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_lookup_outside_four_digit_years_matches_nothing() {
        let store = seeded();
        for on in [date(10000, 1, 1), date(-1, 6, 1)] {
            assert!(store.find_rates(&LinehaulRateFilter::by_date(on)).unwrap().is_empty());
        }
    }

    #[test]
    fn test_rows_persist_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.db");

        {
            let store = SqliteRateStore::open(&path).unwrap();
            store.insert(&rate(0, 1000, 300000)).unwrap();
        }

        let reopened = SqliteRateStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
        assert_eq!(
            reopened.find_rates(&LinehaulRateFilter::by_distance(10)).unwrap(),
            vec![Cents(300000)]
        );
    }
}
