//! Move date scheduling.
//!
//! A date plan is built around a single anchor, the requested pickup date:
//!
//! 1. Pack days are business days walked backward from the day before the
//!    anchor.
//! 2. The pickup day is the first business day on or after the anchor.
//! 3. Transit days are consecutive calendar days starting the day after
//!    pickup. Trucks move on weekends and holidays.
//! 4. The delivery day is the first business day after the last transit day.
//! 5. Report days hold the report-by date of the orders, if any.

use chrono::{Days, NaiveDate};

use crate::config::{ConfigLoader, TransitTimes};
use crate::error::{EngineError, EngineResult};
use crate::models::{MoveDatesSummary, Orders, Shipment};
use crate::route::{Planner, RouteProvider};

use super::business_calendar::BusinessCalendar;
use super::entitlements::entitlement_weight;
use super::transit_times::{pack_days, transit_days};

/// Computes the date plan of a move from its entitlement weight and
/// transit distance.
///
/// # Arguments
///
/// * `calendar` - Business calendar for pack, pickup and delivery days
/// * `transit_times` - Pack and transit day tables
/// * `entitlement_weight` - Weight of the move in pounds
/// * `transit_distance_miles` - Driving distance between the duty stations
/// * `move_date` - The requested pickup date
/// * `report_by_date` - Report-by date from the orders
///
/// # Errors
///
/// Returns `InvalidInput` when the weight or distance is outside the
/// transit time tables.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::{BusinessCalendar, compute_move_dates};
/// use rate_engine::config::{PackDaysBand, TransitDaysBand, TransitTimes};
/// use chrono::NaiveDate;
///
/// let tables = TransitTimes {
///     pack_days: vec![PackDaysBand { weight_lbs_lower: 0, weight_lbs_upper: 10000, days: 2 }],
///     transit_days: vec![TransitDaysBand {
///         distance_miles_lower: 0,
///         distance_miles_upper: 500,
///         weight_lbs_lower: 0,
///         weight_lbs_upper: 10000,
///         days: 3,
///     }],
/// };
/// let date = |m, d| NaiveDate::from_ymd_opt(2018, m, d).unwrap();
///
/// let summary = compute_move_dates(
///     &BusinessCalendar::us_federal(),
///     &tables,
///     5000,
///     300,
///     date(6, 4),
///     date(7, 1),
/// )
/// .unwrap();
///
/// assert_eq!(summary.pack_days, vec![date(5, 31), date(6, 1)]);
/// assert_eq!(summary.pickup_days, vec![date(6, 4)]);
/// assert_eq!(summary.transit_days, vec![date(6, 5), date(6, 6), date(6, 7)]);
/// assert_eq!(summary.delivery_days, vec![date(6, 8)]);
/// assert_eq!(summary.report_days, vec![date(7, 1)]);
/// ```
pub fn compute_move_dates(
    calendar: &BusinessCalendar,
    transit_times: &TransitTimes,
    entitlement_weight: i64,
    transit_distance_miles: i64,
    move_date: NaiveDate,
    report_by_date: NaiveDate,
) -> EngineResult<MoveDatesSummary> {
    let pack_count = pack_days(transit_times, entitlement_weight)?;
    let transit_count = transit_days(transit_times, transit_distance_miles, entitlement_weight)?;

    plan(
        calendar,
        move_date,
        pack_count,
        transit_count,
        vec![report_by_date],
    )
}

/// Computes the date plan of a shipment from its own estimates.
///
/// The report days of the result are empty.
///
/// # Errors
///
/// - `MissingRequiredField` naming `RequestedPickupDate`,
///   `EstimatedPackDays` or `EstimatedTransitDays`, checked in that order
/// - `InvalidInput` if an estimate is negative or above
///   [`MAX_DAY_COUNT`](super::MAX_DAY_COUNT)
pub fn compute_move_dates_from_shipment(
    calendar: &BusinessCalendar,
    shipment: &Shipment,
) -> EngineResult<MoveDatesSummary> {
    let pickup_date = shipment
        .requested_pickup_date
        .ok_or_else(|| EngineError::missing_field("RequestedPickupDate"))?;
    let pack_count = shipment
        .estimated_pack_days
        .ok_or_else(|| EngineError::missing_field("EstimatedPackDays"))?;
    let transit_count = shipment
        .estimated_transit_days
        .ok_or_else(|| EngineError::missing_field("EstimatedTransitDays"))?;

    plan(calendar, pickup_date, pack_count, transit_count, Vec::new())
}

/// Computes the date plan of a move from its orders.
///
/// Resolves the entitlement weight from the rank table and the transit
/// distance between the two duty stations through `planner`, then calls
/// [`compute_move_dates`].
///
/// # Errors
///
/// - `MissingRequiredField` naming `DutyStation.Address` or
///   `NewDutyStation.Address` when an address is empty
/// - `InvalidConfig` when the rank has no entitlement
/// - `Geocode` or `RouteDistance` from the route lookup
/// - any error of [`compute_move_dates`]
pub async fn calculate_move_dates<P: RouteProvider>(
    planner: &Planner<P>,
    config: &ConfigLoader,
    orders: &Orders,
    move_date: NaiveDate,
) -> EngineResult<MoveDatesSummary> {
    if orders.duty_station_address.is_empty() {
        return Err(EngineError::missing_field("DutyStation.Address"));
    }
    if orders.new_duty_station_address.is_empty() {
        return Err(EngineError::missing_field("NewDutyStation.Address"));
    }

    let weight = entitlement_weight(config.get_entitlement(orders.rank)?, orders);
    let distance = planner
        .transit_distance(&orders.duty_station_address, &orders.new_duty_station_address)
        .await?;

    compute_move_dates(
        config.calendar(),
        config.transit_times(),
        weight,
        i64::from(distance),
        move_date,
        orders.report_by_date,
    )
}

fn plan(
    calendar: &BusinessCalendar,
    anchor: NaiveDate,
    pack_count: i64,
    transit_count: i64,
    report_days: Vec<NaiveDate>,
) -> EngineResult<MoveDatesSummary> {
    let pack_days = calendar.business_days_backward(previous_day(anchor)?, pack_count)?;
    let pickup_days = calendar.business_days_forward(anchor, 1)?;

    let last_pickup = pickup_days.last().copied().unwrap_or(anchor);
    let transit_days = calendar.calendar_days_forward(next_day(last_pickup)?, transit_count)?;

    let last_moving_day = transit_days.last().copied().unwrap_or(last_pickup);
    let delivery_days = calendar.business_days_forward(next_day(last_moving_day)?, 1)?;

    Ok(MoveDatesSummary {
        pack_days,
        pickup_days,
        transit_days,
        delivery_days,
        report_days,
    })
}

fn next_day(date: NaiveDate) -> EngineResult<NaiveDate> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| EngineError::invalid_input("move_date", format!("{} is out of range", date)))
}

fn previous_day(date: NaiveDate) -> EngineResult<NaiveDate> {
    date.checked_sub_days(Days::new(1))
        .ok_or_else(|| EngineError::invalid_input("move_date", format!("{} is out of range", date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::MAX_DAY_COUNT;
    use crate::models::{Address, LatLong, Rank};
    use chrono::{Datelike, Weekday};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> ConfigLoader {
        ConfigLoader::load("./config/tariff400ng").unwrap()
    }

    fn shipment(pickup: NaiveDate, pack: i64, transit: i64) -> Shipment {
        Shipment {
            requested_pickup_date: Some(pickup),
            estimated_pack_days: Some(pack),
            estimated_transit_days: Some(transit),
        }
    }

    // ==========================================================================
    // Entitlement path
    // ==========================================================================
    #[test]
    fn test_move_around_independence_day() {
        let config = config();
        // 9000 lbs packs in 3 days; 162 miles heavy transit takes 5 days.
        let summary = compute_move_dates(
            config.calendar(),
            config.transit_times(),
            9000,
            162,
            date(2018, 7, 5),
            date(2018, 8, 1),
        )
        .unwrap();

        assert_eq!(
            summary.pack_days,
            vec![date(2018, 6, 29), date(2018, 7, 2), date(2018, 7, 3)]
        );
        assert_eq!(summary.pickup_days, vec![date(2018, 7, 5)]);
        assert_eq!(
            summary.transit_days,
            vec![
                date(2018, 7, 6),
                date(2018, 7, 7),
                date(2018, 7, 8),
                date(2018, 7, 9),
                date(2018, 7, 10)
            ]
        );
        assert_eq!(summary.delivery_days, vec![date(2018, 7, 11)]);
        assert_eq!(summary.report_days, vec![date(2018, 8, 1)]);
    }

    #[test]
    fn test_distance_outside_transit_table() {
        let config = config();
        let result = compute_move_dates(
            config.calendar(),
            config.transit_times(),
            9000,
            20000,
            date(2018, 7, 5),
            date(2018, 8, 1),
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { field, .. }) if field == "distance_miles"
        ));
    }

    // ==========================================================================
    // Shipment path
    // ==========================================================================
    #[test]
    fn test_shipment_over_labor_day() {
        let calendar = BusinessCalendar::us_federal();
        let summary =
            compute_move_dates_from_shipment(&calendar, &shipment(date(2018, 8, 31), 2, 1))
                .unwrap();

        assert_eq!(summary.pack_days, vec![date(2018, 8, 29), date(2018, 8, 30)]);
        assert_eq!(summary.pickup_days, vec![date(2018, 8, 31)]);
        assert_eq!(summary.transit_days, vec![date(2018, 9, 1)]);
        // Sunday and Labor Day Monday are skipped.
        assert_eq!(summary.delivery_days, vec![date(2018, 9, 4)]);
        assert!(summary.report_days.is_empty());
    }

    #[test]
    fn test_weekend_pickup_moves_to_next_business_day() {
        let calendar = BusinessCalendar::us_federal();
        let summary =
            compute_move_dates_from_shipment(&calendar, &shipment(date(2018, 9, 1), 1, 2)).unwrap();

        assert_eq!(summary.pack_days, vec![date(2018, 8, 31)]);
        assert_eq!(summary.pickup_days, vec![date(2018, 9, 4)]);
        assert_eq!(summary.transit_days, vec![date(2018, 9, 5), date(2018, 9, 6)]);
        assert_eq!(summary.delivery_days, vec![date(2018, 9, 7)]);
    }

    #[test]
    fn test_zero_transit_days_delivers_after_pickup() {
        let calendar = BusinessCalendar::us_federal();
        let summary =
            compute_move_dates_from_shipment(&calendar, &shipment(date(2018, 6, 8), 0, 0)).unwrap();

        assert!(summary.pack_days.is_empty());
        assert!(summary.transit_days.is_empty());
        assert_eq!(summary.pickup_days, vec![date(2018, 6, 8)]);
        assert_eq!(summary.delivery_days, vec![date(2018, 6, 11)]);
    }

    #[test]
    fn test_missing_shipment_fields_named_in_order() {
        let calendar = BusinessCalendar::us_federal();
        let cases = [
            (Shipment::default(), "RequestedPickupDate"),
            (
                Shipment {
                    requested_pickup_date: Some(date(2018, 6, 8)),
                    ..Shipment::default()
                },
                "EstimatedPackDays",
            ),
            (
                Shipment {
                    requested_pickup_date: Some(date(2018, 6, 8)),
                    estimated_pack_days: Some(1),
                    estimated_transit_days: None,
                },
                "EstimatedTransitDays",
            ),
        ];

        for (shipment, expected) in cases {
            match compute_move_dates_from_shipment(&calendar, &shipment) {
                Err(EngineError::MissingRequiredField { field }) => assert_eq!(field, expected),
                other => panic!("Expected MissingRequiredField, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_negative_estimate_rejected() {
        let calendar = BusinessCalendar::us_federal();
        let result =
            compute_move_dates_from_shipment(&calendar, &shipment(date(2018, 6, 8), -1, 1));
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_huge_pack_estimate_rejected() {
        let calendar = BusinessCalendar::us_federal();
        let result =
            compute_move_dates_from_shipment(&calendar, &shipment(date(2018, 6, 8), i64::MAX, 1));
        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { field, .. }) if field == "count"
        ));
    }

    #[test]
    fn test_huge_transit_estimate_rejected() {
        let calendar = BusinessCalendar::us_federal();
        for transit in [MAX_DAY_COUNT + 1, 100_000_000, i64::MAX] {
            let pickup = date(2018, 6, 8);
            let result = compute_move_dates_from_shipment(&calendar, &shipment(pickup, 2, transit));
            assert!(
                matches!(result, Err(EngineError::InvalidInput { .. })),
                "transit {} should be rejected",
                transit
            );
        }
    }

    // ==========================================================================
    // Orders path
    // ==========================================================================
    struct FixedRoute(u32);

    impl RouteProvider for FixedRoute {
        type Error = String;

        async fn geocode(&self, _address: &Address) -> Result<LatLong, String> {
            Ok(LatLong {
                latitude: 35.0,
                longitude: -78.0,
            })
        }

        async fn driving_distance_miles(&self, _: LatLong, _: LatLong) -> Result<u32, String> {
            Ok(self.0)
        }
    }

    fn address(city: &str) -> Address {
        Address {
            street_address_1: "1 Main St".to_string(),
            street_address_2: None,
            city: city.to_string(),
            state: "NC".to_string(),
            postal_code: "28310".to_string(),
        }
    }

    fn orders() -> Orders {
        Orders {
            rank: Rank::E5,
            has_dependents: false,
            spouse_has_pro_gear: false,
            report_by_date: date(2018, 8, 1),
            duty_station_address: address("Fayetteville"),
            new_duty_station_address: address("Beaufort"),
        }
    }

    #[tokio::test]
    async fn test_calculate_move_dates_from_orders() {
        let config = config();
        let planner = Planner::new(FixedRoute(162));

        let summary = calculate_move_dates(&planner, &config, &orders(), date(2018, 7, 5))
            .await
            .unwrap();

        // E_5 without dependents: 7000 + 2000 pro-gear = 9000 lbs.
        let expected = compute_move_dates(
            config.calendar(),
            config.transit_times(),
            9000,
            162,
            date(2018, 7, 5),
            date(2018, 8, 1),
        )
        .unwrap();
        assert_eq!(summary, expected);
    }

    #[tokio::test]
    async fn test_missing_duty_station_addresses() {
        let config = config();
        let planner = Planner::new(FixedRoute(162));

        let mut missing_origin = orders();
        missing_origin.duty_station_address = Address::default();
        match calculate_move_dates(&planner, &config, &missing_origin, date(2018, 7, 5)).await {
            Err(EngineError::MissingRequiredField { field }) => {
                assert_eq!(field, "DutyStation.Address")
            }
            other => panic!("Expected MissingRequiredField, got {:?}", other),
        }

        let mut missing_destination = orders();
        missing_destination.new_duty_station_address = Address::default();
        match calculate_move_dates(&planner, &config, &missing_destination, date(2018, 7, 5)).await
        {
            Err(EngineError::MissingRequiredField { field }) => {
                assert_eq!(field, "NewDutyStation.Address")
            }
            other => panic!("Expected MissingRequiredField, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_plan_is_ordered_and_contiguous(
            offset in 0i64..3650,
            pack in 0i64..6,
            transit in 0i64..30,
        ) {
            let calendar = BusinessCalendar::us_federal();
            let anchor = date(2015, 1, 1) + chrono::Duration::days(offset);
            let summary =
                compute_move_dates_from_shipment(&calendar, &shipment(anchor, pack, transit))
                    .unwrap();

            prop_assert_eq!(summary.pack_days.len() as i64, pack);
            prop_assert_eq!(summary.transit_days.len() as i64, transit);
            prop_assert_eq!(summary.pickup_days.len(), 1);
            prop_assert_eq!(summary.delivery_days.len(), 1);

            let pickup = summary.pickup_days[0];
            prop_assert!(summary.pack_days.iter().all(|d| *d < anchor));
            prop_assert!(summary.pack_days.windows(2).all(|w| w[0] < w[1]));
            if let Some(first) = summary.transit_days.first() {
                prop_assert_eq!(*first, pickup + chrono::Duration::days(1));
            }

            let delivery = summary.delivery_days[0];
            prop_assert!(calendar.is_business_day(delivery));
            prop_assert!(!matches!(delivery.weekday(), Weekday::Sat | Weekday::Sun));
            let last_moving = summary.transit_days.last().copied().unwrap_or(pickup);
            prop_assert!(delivery > last_moving);
        }
    }
}
