//! Transit distance between two addresses.
//!
//! A [`RouteProvider`] wraps whatever geocoding and routing service the host
//! uses. The [`Planner`] geocodes the source and destination concurrently,
//! tags each failure with the role of the address that caused it, and then
//! asks the provider for the driving distance.

use std::fmt::Display;
use std::future::Future;

use crate::error::{EngineError, EngineResult};
use crate::models::{Address, AddressRole, LatLong};

/// A geocoding and routing backend.
pub trait RouteProvider: Send + Sync {
    /// The provider's own failure type.
    type Error: Display + Send;

    /// Resolves an address to coordinates.
    fn geocode(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<LatLong, Self::Error>> + Send;

    /// Driving distance between two points, in whole miles.
    fn driving_distance_miles(
        &self,
        source: LatLong,
        destination: LatLong,
    ) -> impl Future<Output = Result<u32, Self::Error>> + Send;
}

/// Resolves transit distances through a [`RouteProvider`].
///
/// Each call performs two geocodes and one distance request. Nothing is
/// cached or retried.
#[derive(Debug, Clone)]
pub struct Planner<P> {
    provider: P,
}

impl<P: RouteProvider> Planner<P> {
    /// Creates a planner over `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Driving distance in miles from `source` to `destination`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if either address is empty
    /// - `Geocode` naming the address role whose lookup failed; when both
    ///   fail the source error is reported
    /// - `RouteDistance` if the distance request fails
    pub async fn transit_distance(
        &self,
        source: &Address,
        destination: &Address,
    ) -> EngineResult<u32> {
        let (source, destination) = tokio::join!(
            self.locate(AddressRole::Source, source),
            self.locate(AddressRole::Destination, destination),
        );
        let (source, destination) = (source?, destination?);

        self.provider
            .driving_distance_miles(source, destination)
            .await
            .map_err(|e| EngineError::RouteDistance {
                source_location: source.to_string(),
                destination_location: destination.to_string(),
                message: e.to_string(),
            })
    }

    async fn locate(&self, role: AddressRole, address: &Address) -> EngineResult<LatLong> {
        if address.is_empty() {
            return Err(EngineError::invalid_input(
                &format!("{}_address", role),
                "address is empty",
            ));
        }

        self.provider
            .geocode(address)
            .await
            .map_err(|e| EngineError::Geocode {
                role,
                address: address.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Provider answering from fixed tables and recording its calls.
    #[derive(Default)]
    struct FakeProvider {
        locations: HashMap<String, LatLong>,
        distance: Option<u32>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn with_location(mut self, city: &str, latitude: f32, longitude: f32) -> Self {
            self.locations
                .insert(city.to_string(), LatLong { latitude, longitude });
            self
        }

        fn with_distance(mut self, miles: u32) -> Self {
            self.distance = Some(miles);
            self
        }
    }

    impl RouteProvider for FakeProvider {
        type Error = String;

        async fn geocode(&self, address: &Address) -> Result<LatLong, String> {
            self.calls.lock().unwrap().push(format!("geocode {}", address.city));
            self.locations
                .get(&address.city)
                .copied()
                .ok_or_else(|| format!("no match for {}", address.city))
        }

        async fn driving_distance_miles(
            &self,
            _source: LatLong,
            _destination: LatLong,
        ) -> Result<u32, String> {
            self.calls.lock().unwrap().push("distance".to_string());
            self.distance.ok_or_else(|| "no route".to_string())
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

    fn provider() -> FakeProvider {
        FakeProvider::default()
            .with_location("Fayetteville", 35.05, -78.88)
            .with_location("Beaufort", 34.72, -76.66)
    }

    #[tokio::test]
    async fn test_transit_distance() {
        let planner = Planner::new(provider().with_distance(162));

        let miles = planner
            .transit_distance(&address("Fayetteville"), &address("Beaufort"))
            .await
            .unwrap();

        assert_eq!(miles, 162);
        let calls = planner.provider().calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls.last().unwrap(), "distance");
    }

    #[tokio::test]
    async fn test_destination_geocode_failure_is_tagged() {
        let planner = Planner::new(provider().with_distance(162));

        match planner
            .transit_distance(&address("Fayetteville"), &address("Nowhere"))
            .await
        {
            Err(EngineError::Geocode { role, address, message }) => {
                assert_eq!(role, AddressRole::Destination);
                assert!(address.contains("Nowhere"));
                assert_eq!(message, "no match for Nowhere");
            }
            other => panic!("Expected Geocode error, got {:?}", other),
        }
        assert!(
            !planner
                .provider()
                .calls
                .lock()
                .unwrap()
                .contains(&"distance".to_string())
        );
    }

    #[tokio::test]
    async fn test_source_error_wins_when_both_fail() {
        let planner = Planner::new(FakeProvider::default());

        let result = planner
            .transit_distance(&address("Nowhere"), &address("Elsewhere"))
            .await;
        assert!(matches!(
            result,
            Err(EngineError::Geocode {
                role: AddressRole::Source,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_route_distance_failure_carries_coordinates() {
        let planner = Planner::new(provider());

        match planner
            .transit_distance(&address("Fayetteville"), &address("Beaufort"))
            .await
        {
            Err(EngineError::RouteDistance {
                source_location,
                destination_location,
                message,
            }) => {
                assert!(source_location.starts_with("35.0"));
                assert!(destination_location.starts_with("34.72"));
                assert_eq!(message, "no route");
            }
            other => panic!("Expected RouteDistance error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_address_rejected_before_lookup() {
        let planner = Planner::new(provider().with_distance(1));

        let result = planner
            .transit_distance(&Address::default(), &address("Beaufort"))
            .await;
        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "source_address"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
