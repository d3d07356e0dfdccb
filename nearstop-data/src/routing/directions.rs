//! Turn a sequenced route into per-leg distances and durations.
//!
//! [`OsrmDirections`] asks OSRM's Route service for a single route through
//! every stop in order and names each leg after the stops it joins.

use std::time::Duration;

use async_trait::async_trait;
use nearstop_core::{DirectionsRequest, Leg, MeasurementError, Stop};
use thiserror::Error;
use url::Url;

use super::osrm::{RouteLeg, RouteResponse};
use super::osrm_table::{join_service_path, osrm_coordinates};
use super::provider::{
    JsonClient, ProviderBuildError, RoutingServiceConfig, reachable_or_infinite,
};

/// Errors raised while fetching directions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectionsError {
    /// Transport, HTTP or decoding failure, or a service status other than
    /// success.
    #[error(transparent)]
    Request(#[from] MeasurementError),
    /// The service found no route through the stops.
    #[error("no route connects the requested stops")]
    NoRoute,
    /// The route does not have one leg per consecutive pair of stops.
    #[error("expected {expected} legs but the route has {actual}")]
    LegCountMismatch {
        /// Number of consecutive stop pairs.
        expected: usize,
        /// Number of legs returned.
        actual: usize,
    },
}

/// Source of leg-by-leg travel details for a directions request.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Fetch one leg per consecutive pair of stops in `request`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionsError`] when the service cannot be reached or
    /// cannot route through the stops.
    async fn legs(&self, request: &DirectionsRequest) -> Result<Vec<Leg>, DirectionsError>;
}

/// Directions from the OSRM Route API.
#[derive(Debug, Clone)]
pub struct OsrmDirections {
    http: JsonClient,
    base: Url,
    config: RoutingServiceConfig,
}

impl OsrmDirections {
    /// Create a provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(RoutingServiceConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// The request's own travel mode selects the OSRM profile; the
    /// configured mode is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: RoutingServiceConfig) -> Result<Self, ProviderBuildError> {
        let base = config.base_directory()?;
        let http = JsonClient::new(&config)?;
        Ok(Self { http, base, config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &RoutingServiceConfig {
        &self.config
    }

    /// Build the Route API URL for `request`.
    fn route_url(&self, request: &DirectionsRequest) -> Result<Url, MeasurementError> {
        let coordinates = osrm_coordinates(request.coordinates().into_iter());
        let mut url = join_service_path(
            &self.base,
            &format!("route/v1/{}/{coordinates}", request.mode),
        )?;
        url.set_query(Some("overview=false&steps=false"));
        Ok(url)
    }
}

/// Pair the route's legs with the stops they join.
fn convert_response(
    request: &DirectionsRequest,
    response: RouteResponse,
) -> Result<Vec<Leg>, DirectionsError> {
    if response.code == "NoRoute" {
        return Err(DirectionsError::NoRoute);
    }
    if !response.is_ok() {
        return Err(MeasurementError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        }
        .into());
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(DirectionsError::NoRoute)?;

    let stops: Vec<&Stop> = request.stops().collect();
    let expected = stops.len().saturating_sub(1);
    if route.legs.len() != expected {
        return Err(DirectionsError::LegCountMismatch {
            expected,
            actual: route.legs.len(),
        });
    }

    Ok(stops
        .iter()
        .zip(stops.iter().skip(1))
        .zip(route.legs)
        .map(|((from, to), leg)| to_leg(from, to, &leg))
        .collect())
}

fn to_leg(from: &Stop, to: &Stop, leg: &RouteLeg) -> Leg {
    Leg {
        start_address: from.display_name(),
        end_address: to.display_name(),
        distance_metres: reachable_or_infinite(Some(leg.distance)),
        duration: Duration::try_from_secs_f64(leg.duration).unwrap_or(Duration::MAX),
    }
}

#[async_trait]
impl DirectionsProvider for OsrmDirections {
    async fn legs(&self, request: &DirectionsRequest) -> Result<Vec<Leg>, DirectionsError> {
        let url = self.route_url(request)?;
        log::debug!(
            "requesting OSRM route through {} stops",
            request.waypoints.len().saturating_add(2)
        );
        let response: RouteResponse = self.http.get_json(&url).await?;
        convert_response(request, response)
    }
}
