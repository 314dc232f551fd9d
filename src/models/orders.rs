//! Orders and shipment records consumed by the move date scheduler.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Address;

/// Service member rank, which sets the weight entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Enlisted grade E-1.
    #[serde(rename = "E_1")]
    E1,
    /// Enlisted grade E-2.
    #[serde(rename = "E_2")]
    E2,
    /// Enlisted grade E-3.
    #[serde(rename = "E_3")]
    E3,
    /// Enlisted grade E-4.
    #[serde(rename = "E_4")]
    E4,
    /// Enlisted grade E-5.
    #[serde(rename = "E_5")]
    E5,
    /// Enlisted grade E-6.
    #[serde(rename = "E_6")]
    E6,
    /// Enlisted grade E-7.
    #[serde(rename = "E_7")]
    E7,
    /// Enlisted grade E-8.
    #[serde(rename = "E_8")]
    E8,
    /// Enlisted grade E-9.
    #[serde(rename = "E_9")]
    E9,
    /// Warrant officer W-1.
    #[serde(rename = "W_1")]
    W1,
    /// Warrant officer W-2.
    #[serde(rename = "W_2")]
    W2,
    /// Warrant officer W-3.
    #[serde(rename = "W_3")]
    W3,
    /// Warrant officer W-4.
    #[serde(rename = "W_4")]
    W4,
    /// Warrant officer W-5.
    #[serde(rename = "W_5")]
    W5,
    /// Officer O-1 or service academy graduate.
    #[serde(rename = "O_1_ACADEMY_GRADUATE")]
    O1AcademyGraduate,
    /// Officer O-2.
    #[serde(rename = "O_2")]
    O2,
    /// Officer O-3.
    #[serde(rename = "O_3")]
    O3,
    /// Officer O-4.
    #[serde(rename = "O_4")]
    O4,
    /// Officer O-5.
    #[serde(rename = "O_5")]
    O5,
    /// Officer O-6.
    #[serde(rename = "O_6")]
    O6,
    /// Officer O-7.
    #[serde(rename = "O_7")]
    O7,
    /// Officer O-8.
    #[serde(rename = "O_8")]
    O8,
    /// Officer O-9.
    #[serde(rename = "O_9")]
    O9,
    /// Officer O-10.
    #[serde(rename = "O_10")]
    O10,
    /// Service academy cadet.
    #[serde(rename = "ACADEMY_CADET")]
    AcademyCadet,
    /// Aviation cadet.
    #[serde(rename = "AVIATION_CADET")]
    AviationCadet,
    /// Naval academy midshipman.
    #[serde(rename = "MIDSHIPMAN")]
    Midshipman,
    /// Civilian employee.
    #[serde(rename = "CIVILIAN_EMPLOYEE")]
    CivilianEmployee,
}

/// The orders behind a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orders {
    /// Rank of the service member.
    pub rank: Rank,
    /// Whether dependents move with the service member.
    #[serde(default)]
    pub has_dependents: bool,
    /// Whether the spouse ships professional gear.
    #[serde(default)]
    pub spouse_has_pro_gear: bool,
    /// Date the service member must report to the new duty station.
    pub report_by_date: NaiveDate,
    /// Address of the current duty station.
    #[serde(default)]
    pub duty_station_address: Address,
    /// Address of the new duty station.
    #[serde(default)]
    pub new_duty_station_address: Address,
}

/// The scheduling estimates recorded on a shipment.
///
/// Every field may be absent on a record that has not been surveyed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// The pickup date the customer asked for.
    #[serde(default)]
    pub requested_pickup_date: Option<NaiveDate>,
    /// Estimated number of pack days.
    #[serde(default)]
    pub estimated_pack_days: Option<i64>,
    /// Estimated number of transit days.
    #[serde(default)]
    pub estimated_transit_days: Option<i64>,
}
