//! The date plan of a move.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pack, pickup, transit, delivery and report dates for one move or shipment.
///
/// Every sequence is in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDatesSummary {
    /// Business days on which the household goods are packed.
    pub pack_days: Vec<NaiveDate>,
    /// The business day of pickup.
    pub pickup_days: Vec<NaiveDate>,
    /// Calendar days in transit; weekends and holidays included.
    pub transit_days: Vec<NaiveDate>,
    /// The business day of delivery.
    pub delivery_days: Vec<NaiveDate>,
    /// The report-by date from the orders.
    pub report_days: Vec<NaiveDate>,
}
