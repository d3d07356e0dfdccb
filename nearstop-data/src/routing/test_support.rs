//! Test doubles for routing adapters.
//!
//! [`StubDistanceOracle`], [`StubDirections`] and [`StubGeocoder`] return
//! pre-configured responses without making HTTP requests.

use std::time::Duration;

use async_trait::async_trait;
use nearstop_core::{
    Coordinate, DirectionsRequest, DistanceOracle, DistanceQuery, Distances,
    InvalidInputLocation, Leg, MeasurementError, Stop,
};

use super::directions::{DirectionsError, DirectionsProvider};
use super::geocoding::{GeocodeError, Geocoder};

/// Stub `DistanceOracle` for testing.
///
/// # Example
///
/// ```
/// use nearstop_core::{Coordinate, DistanceOracle, DistanceQuery};
/// use nearstop_data::routing::test_support::StubDistanceOracle;
///
/// # let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let oracle = StubDistanceOracle::with_distances(vec![120.0, 80.0]);
/// let query = DistanceQuery::new(
///     Coordinate::new(0.0, 0.0),
///     vec![Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)],
/// )?;
///
/// let distances = runtime.block_on(oracle.measure(&query))?;
/// assert_eq!(distances, vec![120.0, 80.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubDistanceOracle {
    response: Result<Distances, MeasurementError>,
}

impl StubDistanceOracle {
    /// Create an oracle that returns `distances` for every query,
    /// whatever its length.
    #[must_use]
    pub const fn with_distances(distances: Distances) -> Self {
        Self {
            response: Ok(distances),
        }
    }

    /// Create an oracle that fails every query with `error`.
    #[must_use]
    pub const fn with_error(error: MeasurementError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[async_trait]
impl DistanceOracle for StubDistanceOracle {
    async fn measure(&self, _query: &DistanceQuery) -> Result<Distances, MeasurementError> {
        self.response.clone()
    }
}

/// Stub `DirectionsProvider` for testing.
#[derive(Debug, Clone)]
pub struct StubDirections {
    response: StubLegs,
}

#[derive(Debug, Clone)]
enum StubLegs {
    Uniform {
        distance_metres: f64,
        duration: Duration,
    },
    Error(DirectionsError),
}

impl StubDirections {
    /// Create a provider that returns one leg per stop pair, each with the
    /// given distance and duration.
    #[must_use]
    pub const fn uniform(distance_metres: f64, duration: Duration) -> Self {
        Self {
            response: StubLegs::Uniform {
                distance_metres,
                duration,
            },
        }
    }

    /// Create a provider that fails every request with `error`.
    #[must_use]
    pub const fn with_error(error: DirectionsError) -> Self {
        Self {
            response: StubLegs::Error(error),
        }
    }
}

#[async_trait]
impl DirectionsProvider for StubDirections {
    async fn legs(&self, request: &DirectionsRequest) -> Result<Vec<Leg>, DirectionsError> {
        match &self.response {
            StubLegs::Uniform {
                distance_metres,
                duration,
            } => {
                let names: Vec<String> = request.stops().map(|stop| stop.display_name()).collect();
                Ok(names
                    .iter()
                    .zip(names.iter().skip(1))
                    .map(|(from, to)| Leg {
                        start_address: from.clone(),
                        end_address: to.clone(),
                        distance_metres: *distance_metres,
                        duration: *duration,
                    })
                    .collect())
            }
            StubLegs::Error(error) => Err(error.clone()),
        }
    }
}

/// Stub `Geocoder` resolving a fixed set of addresses.
///
/// Unknown text is rejected with status `ZERO_RESULTS`.
#[derive(Debug, Clone, Default)]
pub struct StubGeocoder {
    places: Vec<(String, Stop)>,
    failure: Option<GeocodeError>,
}

impl StubGeocoder {
    /// Resolve `query` to `coordinate`, reporting `formatted_address`.
    #[must_use]
    pub fn with_place(
        mut self,
        query: impl Into<String>,
        coordinate: Coordinate,
        formatted_address: impl Into<String>,
    ) -> Self {
        self.places
            .push((query.into(), Stop::new(coordinate).with_address(formatted_address)));
        self
    }

    /// Create a geocoder that fails every lookup with `error`.
    #[must_use]
    pub const fn with_error(error: GeocodeError) -> Self {
        Self {
            places: Vec::new(),
            failure: Some(error),
        }
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, address: &str) -> Result<Stop, GeocodeError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.places
            .iter()
            .find(|(query, _)| query == address)
            .map(|(_, stop)| stop.clone())
            .ok_or_else(|| {
                GeocodeError::Unresolved(InvalidInputLocation::Unresolved {
                    input: address.to_owned(),
                    status: "ZERO_RESULTS".to_owned(),
                })
            })
    }
}
