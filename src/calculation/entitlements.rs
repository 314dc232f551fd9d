//! Entitlement weight calculation.

use crate::config::Entitlement;
use crate::models::Orders;

/// Total weight in pounds a move is entitled to.
///
/// The household goods allowance depends on whether the orders carry
/// dependents. The member's pro-gear allowance is always added, the
/// spouse's only when the spouse has pro-gear.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::entitlement_weight;
/// use rate_engine::config::Entitlement;
/// use rate_engine::models::{Orders, Rank};
/// use chrono::NaiveDate;
///
/// let entitlement = Entitlement {
///     total_weight_self: 7000,
///     total_weight_self_plus_dependents: 9000,
///     pro_gear_weight: 2000,
///     pro_gear_weight_spouse: 500,
/// };
/// let orders = Orders {
///     rank: Rank::E5,
///     has_dependents: true,
///     spouse_has_pro_gear: false,
///     report_by_date: NaiveDate::from_ymd_opt(2018, 8, 1).unwrap(),
///     duty_station_address: Default::default(),
///     new_duty_station_address: Default::default(),
/// };
///
/// assert_eq!(entitlement_weight(&entitlement, &orders), 11000);
/// ```
pub fn entitlement_weight(entitlement: &Entitlement, orders: &Orders) -> i64 {
    let household_goods = if orders.has_dependents {
        entitlement.total_weight_self_plus_dependents
    } else {
        entitlement.total_weight_self
    };
    let spouse_pro_gear = if orders.spouse_has_pro_gear {
        entitlement.pro_gear_weight_spouse
    } else {
        0
    };

    household_goods + entitlement.pro_gear_weight + spouse_pro_gear
}
